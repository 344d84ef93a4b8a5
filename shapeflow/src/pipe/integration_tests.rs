//! Integration tests for pipes nested in composite schemas.

#[cfg(test)]
mod tests {
    use crate::actions::{
        check_async, email, min_length, min_value, to_lower_case, transform_async, trim,
    };
    use crate::core::{Config, Dataset, Describe, PathKey};
    use crate::pipe::pipe;
    use crate::schemas::{array, number, object, optional, string, Schema};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn user_schema() -> impl Schema {
        object()
            .entry("email", pipe(string()).action(trim()).action(to_lower_case()).action(email()))
            .entry("age", pipe(number()).action(min_value(18)))
            .entry("nickname", optional(pipe(string()).action(min_length(2))))
    }

    #[test]
    fn test_pipes_inside_object() {
        let schema = user_schema();
        let mut dataset = Dataset::from_value(json!({
            "email": "  Jane@Example.COM ",
            "age": 30
        }));
        schema.run(&mut dataset, &Config::new());

        assert!(dataset.is_success());
        assert_eq!(dataset.value, Some(json!({"email": "jane@example.com", "age": 30})));
    }

    #[test]
    fn test_action_issues_are_pathed() {
        let schema = user_schema();
        let mut dataset = Dataset::from_value(json!({
            "email": "nope",
            "age": 12,
            "nickname": "x"
        }));
        schema.run(&mut dataset, &Config::new());

        assert!(dataset.typed);
        let paths: Vec<Vec<&PathKey>> = dataset.issues.iter().map(|issue| issue.path_keys()).collect();
        assert_eq!(
            paths,
            vec![
                vec![&PathKey::Key("email".to_string())],
                vec![&PathKey::Key("age".to_string())],
                vec![&PathKey::Key("nickname".to_string())],
            ]
        );
    }

    #[test]
    fn test_pipe_over_array_items() {
        let schema = array(pipe(string()).action(min_length(2)));
        let mut dataset = Dataset::from_value(json!(["ok", "x", "fine"]));
        schema.run(&mut dataset, &Config::new());

        assert_eq!(dataset.issues.len(), 1);
        assert_eq!(dataset.issues[0].path_keys(), vec![&PathKey::Index(1)]);
    }

    #[tokio::test]
    async fn test_async_pipe() {
        let schema = pipe(string())
            .action(check_async(|value: Value| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                value != "taken"
            }))
            .action(transform_async(|value: Value| async move {
                json!(format!("@{}", value.as_str().unwrap_or_default()))
            }));
        assert!(schema.is_async());

        let mut dataset = Dataset::from_value(json!("free"));
        schema.run_async(&mut dataset, &Config::new()).await;
        assert_eq!(dataset.value, Some(json!("@free")));

        let mut dataset = Dataset::from_value(json!("taken"));
        schema.run_async(&mut dataset, &Config::new()).await;
        assert!(!dataset.typed);
        assert_eq!(dataset.value, Some(json!("taken")));
        assert_eq!(dataset.issues.len(), 1);
    }
}
