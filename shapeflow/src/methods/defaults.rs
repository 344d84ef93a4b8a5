//! Reading defaults and fallbacks off a schema.

use crate::schemas::Schema;
use serde_json::Value;

/// Returns the default of a schema, computing it if it is dynamic.
pub fn get_default(schema: &dyn Schema) -> Option<Value> {
    schema.default_value()
}

/// Returns the fallback of a schema, computing it if it is dynamic.
pub fn get_fallback(schema: &dyn Schema) -> Option<Value> {
    schema.fallback_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::pipe;
    use crate::actions::trim;
    use crate::schemas::{fallback, nullish, optional, string, ValueSource};
    use serde_json::json;

    #[test]
    fn test_get_default() {
        assert_eq!(get_default(&string()), None);
        assert_eq!(get_default(&optional(string()).with_default(json!("x"))), Some(json!("x")));
        assert_eq!(
            get_default(&nullish(string()).with_default(ValueSource::func(|| json!("y")))),
            Some(json!("y"))
        );
    }

    #[test]
    fn test_get_fallback() {
        assert_eq!(get_fallback(&string()), None);
        assert_eq!(get_fallback(&fallback(string(), json!("z"))), Some(json!("z")));
        assert_eq!(
            get_fallback(&pipe(fallback(string(), json!("z"))).action(trim())),
            Some(json!("z"))
        );
    }
}
