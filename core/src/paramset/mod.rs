//! Parameter Sets

use crate::base::*;
use std::collections::BTreeMap;
use std::fmt;

mod paramset_item;

// Re-export
pub use paramset_item::*;

/// A map of parameter set items stored by name. Ordered so that reports and
/// display output are stable.
pub type ParamSetMap<T> = BTreeMap<String, ParamSetItem<T>>;

/// Stores parameter set items of different types keyed by name. Every lookup
/// marks the item as used so that unrecognized parameters can be reported.
#[derive(Clone, Debug, Default)]
pub struct ParamSet {
    pub ints: ParamSetMap<Int>,
    pub floats: ParamSetMap<Float>,
    pub strings: ParamSetMap<String>,
}

/// Define a macro that can be used to generate a function for adding/replacing
/// parameter set item.
macro_rules! paramset_add {
    ($func: ident, $t: ty, $paramset: ident) => {
        /// Add/replace a parameter.
        ///
        /// * `name`   - Parameter name.
        /// * `values` - Parameter values.
        pub fn $func(&mut self, name: &str, values: &[$t]) {
            self.$paramset
                .insert(String::from(name), ParamSetItem::new(values.to_vec()));
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a single item.
macro_rules! paramset_find_one {
    ($func: ident, $t: ty, $paramset: ident) => {
        /// Returns the value of a single valued parameter or `default` when
        /// it is absent or not single valued.
        ///
        /// * `name`    - Parameter name.
        /// * `default` - Default value.
        pub fn $func(&self, name: &str, default: $t) -> $t {
            match self.$paramset.get(name) {
                Some(param) => {
                    param.looked_up.set(true);
                    if param.values.len() == 1 {
                        param.values[0].clone()
                    } else {
                        default
                    }
                }
                None => default,
            }
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a list.
macro_rules! paramset_find {
    ($func: ident, $t: ty, $paramset: ident) => {
        /// Returns all values of a parameter or `None` if it is absent.
        ///
        /// * `name` - Parameter name.
        pub fn $func(&self, name: &str) -> Option<Vec<$t>> {
            self.$paramset.get(name).map(|param| {
                param.looked_up.set(true);
                param.values.clone()
            })
        }
    };
}

/// Define a macro that can be used to print parameter set items.
macro_rules! display_param {
    ($params: expr, $param_type: literal, $formatter: expr) => {
        for (name, param) in $params.iter() {
            writeln!($formatter, "    \"{} {}\" {}", $param_type, name, param)?;
        }
    };
}

/// Define a macro that can be used to collect parameters never looked up.
macro_rules! collect_unused {
    ($params: expr, $param_type: literal, $out: expr) => {
        for (name, param) in $params.iter() {
            if !param.looked_up.get() {
                $out.push(format!("\"{} {}\"", $param_type, name));
            }
        }
    };
}

impl ParamSet {
    /// Returns a new `ParamSet`.
    pub fn new() -> Self {
        Self::default()
    }

    paramset_add!(add_int, Int, ints);
    paramset_find_one!(find_one_int, Int, ints);
    paramset_find!(find_int, Int, ints);

    paramset_add!(add_float, Float, floats);
    paramset_find_one!(find_one_float, Float, floats);
    paramset_find!(find_float, Float, floats);

    paramset_add!(add_string, String, strings);
    paramset_find_one!(find_one_string, String, strings);
    paramset_find!(find_string, String, strings);

    /// Returns the declared type of a parameter regardless of whether it was
    /// looked up, or `None` if no parameter has that name.
    ///
    /// * `name` - Parameter name.
    pub fn declared_type(&self, name: &str) -> Option<&'static str> {
        if self.ints.contains_key(name) {
            Some("integer")
        } else if self.floats.contains_key(name) {
            Some("float")
        } else if self.strings.contains_key(name) {
            Some("string")
        } else {
            None
        }
    }

    /// Returns the parameters that were never looked up, formatted as
    /// `"type name"`.
    pub fn unused(&self) -> Vec<String> {
        let mut unused = vec![];
        collect_unused!(self.ints, "integer", unused);
        collect_unused!(self.floats, "float", unused);
        collect_unused!(self.strings, "string", unused);
        unused
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.ints.is_empty() && self.floats.is_empty() && self.strings.is_empty()
    }

    /// Clear all parameter set items.
    pub fn clear(&mut self) {
        self.ints.clear();
        self.floats.clear();
        self.strings.clear();
    }
}

impl fmt::Display for ParamSet {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_param!(self.ints, "integer", f);
        display_param!(self.floats, "float", f);
        display_param!(self.strings, "string", f);
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
