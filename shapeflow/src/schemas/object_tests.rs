//! Behavioural tests for the object schema family.

#[cfg(test)]
mod tests {
    use crate::actions::{check_async, min_length};
    use crate::core::{Config, Dataset, Describe, PathKey, PathOrigin};
    use crate::pipe::pipe;
    use crate::schemas::{
        fallback, loose_object, nullable, number, object, object_with_rest, optional,
        strict_object, string, ObjectSchema, Schema, ValueSource,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn run(schema: &dyn Schema, input: Value, config: &Config) -> Dataset {
        let mut dataset = Dataset::from_value(input);
        schema.run(&mut dataset, config);
        dataset
    }

    fn key(name: &str) -> PathKey {
        PathKey::Key(name.to_string())
    }

    #[test]
    fn test_valid_input_passes_through_unchanged() {
        let schema = object().entry("a", string()).entry("b", number());
        let input = json!({"a": "x", "b": 1});

        let first = run(&schema, input.clone(), &Config::new());
        assert!(first.is_success());
        assert_eq!(first.value, Some(input));

        let second = run(&schema, first.value.clone().unwrap_or_default(), &Config::new());
        assert_eq!(first, second);
    }

    #[test]
    fn test_nested_path_is_outer_to_inner() {
        let schema = object().entry("a", object().entry("b", string()));
        let dataset = run(&schema, json!({"a": {"b": 5}}), &Config::new());

        assert_eq!(dataset.issues.len(), 1);
        assert_eq!(dataset.issues[0].path_keys(), vec![&key("a"), &key("b")]);
        assert!(!dataset.typed);
    }

    #[test]
    fn test_missing_key_issue() {
        let schema = object().entry("name", string());
        let dataset = run(&schema, json!({}), &Config::new());

        let issue = &dataset.issues[0];
        assert_eq!(issue.issue_type, "object");
        assert_eq!(issue.expected.as_deref(), Some("\"name\""));
        assert_eq!(issue.received, "undefined");
        assert_eq!(issue.message, "Invalid key: Expected \"name\" but received undefined");
        let path = issue.path.as_ref().map(|path| path[0].origin);
        assert_eq!(path, Some(PathOrigin::Key));
        assert!(!dataset.typed);
    }

    #[test]
    fn test_abort_early_stops_at_first_issue() {
        let schema = object()
            .entry("a", string())
            .entry("b", string())
            .entry("c", string());

        let all = run(&schema, json!({}), &Config::new());
        assert_eq!(all.issues.len(), 3);

        let first = run(&schema, json!({}), &Config::new().with_abort_early(true));
        assert_eq!(first.issues.len(), 1);
        assert_eq!(first.issues[0].path_keys(), vec![&key("a")]);
    }

    #[test]
    fn test_unknown_key_policies() {
        let input = json!({"a": "x", "b": 1});

        let plain = run(&object().entry("a", string()), input.clone(), &Config::new());
        assert!(plain.is_success());
        assert_eq!(plain.value, Some(json!({"a": "x"})));

        let loose = run(&loose_object().entry("a", string()), input.clone(), &Config::new());
        assert!(loose.is_success());
        assert_eq!(loose.value, Some(input.clone()));

        let strict = run(&strict_object().entry("a", string()), input, &Config::new());
        assert!(!strict.typed);
        assert_eq!(strict.issues.len(), 1);
        let issue = &strict.issues[0];
        assert_eq!(issue.expected.as_deref(), Some("never"));
        assert_eq!(issue.received, "\"b\"");
        assert_eq!(issue.path_keys(), vec![&key("b")]);
    }

    #[test]
    fn test_loose_object_round_trip() {
        let schema = loose_object().entry("id", number());
        let dataset = run(&schema, json!({"id": 5, "extra": "x"}), &Config::new());
        assert_eq!(dataset.value, Some(json!({"id": 5, "extra": "x"})));
    }

    #[test]
    fn test_typed_and_issues_are_independent() {
        let schema = object().entry("name", pipe(string()).action(min_length(3)));
        let dataset = run(&schema, json!({"name": "ab"}), &Config::new());

        assert!(dataset.typed);
        assert!(dataset.has_issues());
    }

    #[test]
    fn test_optional_keys_and_defaults() {
        let schema = object()
            .entry("a", optional(string()))
            .entry("b", optional(number()).with_default(json!(10)))
            .entry("c", nullable(string()));

        let dataset = run(&schema, json!({"c": null}), &Config::new());
        assert!(dataset.is_success());
        assert_eq!(dataset.value, Some(json!({"b": 10, "c": null})));

        let dataset = run(&schema, json!({}), &Config::new());
        assert_eq!(dataset.issues.len(), 1);
        assert_eq!(dataset.issues[0].path_keys(), vec![&key("c")]);
    }

    #[test]
    fn test_computed_default() {
        let schema = object().entry(
            "tags",
            optional(string()).with_default(ValueSource::func(|| json!("none"))),
        );
        let dataset = run(&schema, json!({}), &Config::new());
        assert_eq!(dataset.value, Some(json!({"tags": "none"})));
    }

    #[test]
    fn test_fallback_entries() {
        let schema = object()
            .entry("retries", fallback(number(), json!(3)))
            .entry("mode", fallback(string(), json!("auto")));

        let dataset = run(&schema, json!({"retries": "many"}), &Config::new());
        assert!(dataset.is_success());
        assert_eq!(dataset.value, Some(json!({"retries": 3, "mode": "auto"})));
    }

    #[test]
    fn test_object_with_rest() {
        let schema = object_with_rest(number()).entry("name", string());

        let dataset = run(&schema, json!({"name": "n", "x": 1, "y": 2}), &Config::new());
        assert!(dataset.is_success());
        assert_eq!(dataset.value, Some(json!({"name": "n", "x": 1, "y": 2})));

        let dataset = run(&schema, json!({"name": "n", "x": "one"}), &Config::new());
        assert_eq!(dataset.issues.len(), 1);
        assert_eq!(dataset.issues[0].path_keys(), vec![&key("x")]);
        let origin = dataset.issues[0].path.as_ref().map(|path| path[0].origin);
        assert_eq!(origin, Some(PathOrigin::Value));
    }

    #[test]
    fn test_redeclared_entry_replaces_schema() {
        let schema: ObjectSchema = object().entry("a", string()).entry("b", string()).entry("a", number());
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(run(&schema, json!({"a": 1, "b": "x"}), &Config::new()).is_success());
    }

    #[test]
    fn test_rejects_non_object() {
        let schema = object().entry("a", string());
        let dataset = run(&schema, json!([1]), &Config::new());
        assert_eq!(dataset.issues.len(), 1);
        assert_eq!(dataset.issues[0].message, "Invalid type: Expected Object but received Array");
        assert!(dataset.issues[0].path.is_none());
    }

    #[tokio::test]
    async fn test_async_merge_order_follows_declaration() {
        let slow = |millis: u64| {
            pipe(string()).action(check_async(move |_: Value| async move {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                false
            }))
        };
        let schema = object()
            .entry("first", slow(30))
            .entry("second", slow(1))
            .entry("third", slow(15));
        assert!(schema.is_async());

        let mut dataset = Dataset::from_value(json!({"first": "a", "second": "b", "third": "c"}));
        schema.run_async(&mut dataset, &Config::new()).await;

        let order: Vec<Vec<&PathKey>> = dataset.issues.iter().map(|issue| issue.path_keys()).collect();
        assert_eq!(
            order,
            vec![vec![&key("first")], vec![&key("second")], vec![&key("third")]]
        );
        assert_eq!(
            dataset.value,
            Some(json!({"first": "a", "second": "b", "third": "c"}))
        );
    }

    #[tokio::test]
    async fn test_async_abort_early_stops_at_first_issue() {
        let schema = object()
            .entry("a", number())
            .entry("b", number());
        let config = Config::new().with_abort_early(true);

        let mut dataset = Dataset::from_value(json!({"a": "x", "b": "y"}));
        schema.run_async(&mut dataset, &config).await;
        assert_eq!(dataset.issues.len(), 1);
        assert_eq!(dataset.issues[0].path_keys(), vec![&key("a")]);
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let schema = strict_object()
            .entry("a", string())
            .entry("b", optional(number()).with_default(json!(1)));
        let input = json!({"a": 1, "z": true});

        let sync = run(&schema, input.clone(), &Config::new());
        let mut async_dataset = Dataset::from_value(input);
        schema.run_async(&mut async_dataset, &Config::new()).await;
        assert_eq!(sync, async_dataset);
    }

    #[test]
    fn test_issue_paths_share_one_parent() {
        let schema = strict_object().entry("a", string());
        let input = json!({"a": 1, "x": 1, "y": 2});
        let dataset = run(&schema, input.clone(), &Config::new());

        assert_eq!(dataset.issues.len(), 3);
        let parents: Vec<_> = dataset
            .issues
            .iter()
            .map(|issue| std::sync::Arc::clone(&issue.path.as_ref().unwrap()[0].input))
            .collect();
        assert_eq!(*parents[0], input);
        assert!(parents.iter().all(|parent| std::sync::Arc::ptr_eq(parent, &parents[0])));
    }
}
