//! Strict and deferred validation through a visitor.

mod common;

use common::{person, Person, AGE};
use prism_core::{attrs, Value};
use prism_registry::{AccessError, Registry};
use prism_validation::RangeOptions;
use prism_visitor::{Visitor, VisitorError, VisitorOptions};

fn age_visitor(registry: &Registry, options: VisitorOptions) -> Visitor<'_, Person> {
    let mut visitor = Visitor::for_instance(registry, person("Ada", 30), options).unwrap();
    visitor
        .rules("Age")
        .unwrap()
        .range(0i64, 150i64, RangeOptions::CloseInterval);
    visitor
}

mod strict {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejected_set_leaves_value_untouched() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::strict());

        // WHEN
        let err = visitor.set("Age", 200i64).unwrap_err();

        // THEN
        assert!(matches!(err, VisitorError::Validation(_)));
        assert_eq!(err.failures().len(), 1);
        assert_eq!(err.failures()[0].member, "Age");
        assert_eq!(err.failures()[0].rule_name, "Range");
        assert_eq!(visitor.get("Age").unwrap(), Value::Int(30));
    }

    #[test]
    fn test_valid_set_is_applied() {
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::strict());

        visitor.set_selected(AGE, 150).unwrap();

        assert_eq!(visitor.get_selected(AGE).unwrap(), 150);
    }

    #[test]
    fn test_rejected_set_is_not_recorded() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::strict().with_repeatable(true));

        // WHEN
        visitor.set("Age", 40i64).unwrap();
        visitor.set("Age", -1i64).unwrap_err();

        // THEN
        let history = visitor.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.records()[0].value, Value::Int(40));
    }

    #[test]
    fn test_batch_reports_every_offending_member_and_applies_nothing() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::strict());
        visitor.rules("Name").unwrap().min_length(3).unwrap();

        // WHEN
        let err = visitor
            .set_many(attrs! { "Age" => 200i64, "Name" => "Al", "Tags" => vec!["x"] })
            .unwrap_err();

        // THEN
        let members: Vec<&str> = err.failures().iter().map(|o| o.member.as_str()).collect();
        assert_eq!(members, vec!["Age", "Name"]);
        assert_eq!(visitor.instance(), Some(&person("Ada", 30)));
    }

    #[test]
    fn test_valid_batch_is_applied() {
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::strict());

        visitor
            .set_many(attrs! { "Age" => 31i64, "Name" => "Grace" })
            .unwrap();

        assert_eq!(visitor.instance(), Some(&person("Grace", 31)));
    }

    #[test]
    fn test_accessor_errors_in_batch_fail_fast() {
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::strict());

        let err = visitor
            .set_many(attrs! { "Age" => 31i64, "Ghost" => 1i64 })
            .unwrap_err();

        assert!(matches!(
            err,
            VisitorError::Access(AccessError::UnknownMember { .. })
        ));
        assert_eq!(visitor.get_selected(AGE).unwrap(), 30);
    }

    #[test]
    fn test_batch_that_cannot_convert_applies_nothing() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::strict().with_repeatable(true));

        // WHEN every entry passes validation but Name cannot hold null
        let err = visitor
            .set_many(attrs! { "Age" => 99i64, "Name" => Value::Null })
            .unwrap_err();

        // THEN
        assert!(matches!(
            err,
            VisitorError::Access(AccessError::Conversion { ref member, .. }) if member == "Name"
        ));
        assert_eq!(visitor.instance(), Some(&person("Ada", 30)));
        assert!(visitor.history().unwrap().is_empty());
    }
}

mod deferred {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_succeeds_and_verify_reports_failure() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::new());

        // WHEN
        visitor.set("Age", 200i64).unwrap();
        let result = visitor.verify().unwrap();

        // THEN
        assert_eq!(visitor.get("Age").unwrap(), Value::Int(200));
        assert!(!result.is_success());
        assert_eq!(result.failed_members().collect::<Vec<_>>(), vec!["Age"]);
    }

    #[test]
    fn test_verify_and_raise() {
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::new());
        assert!(visitor.verify_and_raise().is_ok());

        visitor.set("Age", -5i64).unwrap();

        let err = visitor.verify_and_raise().unwrap_err();
        assert_eq!(err.failures()[0].evaluated_value, Value::Int(-5));
    }

    #[test]
    fn test_verify_reports_every_ruled_member() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::new());
        visitor.rules("Name").unwrap().required().max_length(2).unwrap();

        // WHEN
        let result = visitor.verify().unwrap();

        // THEN
        assert_eq!(result.member_names().collect::<Vec<_>>(), vec!["Age", "Name"]);
        assert_eq!(result.member("Name").len(), 2);
        assert_eq!(result.failed_members().collect::<Vec<_>>(), vec!["Name"]);
    }

    #[test]
    fn test_batch_with_invalid_entry_applies_nothing() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor = age_visitor(&registry, VisitorOptions::repeatable());

        // WHEN Tags holds a number where text is declared
        let err = visitor
            .set_many(attrs! {
                "Age" => 31i64,
                "Tags" => Value::List(vec![Value::String("ok".into()), Value::Int(1)]),
            })
            .unwrap_err();

        // THEN
        assert!(matches!(
            err,
            VisitorError::Access(AccessError::Conversion { ref member, .. }) if member == "Tags"
        ));
        assert_eq!(visitor.instance(), Some(&person("Ada", 30)));
        assert!(visitor.history().unwrap().is_empty());
    }
}

mod rules {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_length_rules_are_mutually_exclusive() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, person("Ada", 30), VisitorOptions::new()).unwrap();

        // WHEN
        visitor
            .rules("Name")
            .unwrap()
            .min_length(2)
            .unwrap()
            .length(4)
            .unwrap();
        let result = visitor.verify().unwrap();

        // THEN
        let outcomes = result.member("Name");
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].rule_name, "Length");
        assert!(!result.is_success());
    }

    #[test]
    fn test_minimum_and_maximum_coexist() {
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, person("Ada", 30), VisitorOptions::new()).unwrap();

        visitor
            .rules("Name")
            .unwrap()
            .min_length(2)
            .unwrap()
            .max_length(4)
            .unwrap();

        assert_eq!(visitor.validation().rules_for("Name").len(), 2);
        assert!(visitor.verify().unwrap().is_success());
    }

    #[test]
    fn test_missing_text_has_length_zero() {
        // GIVEN a person without a nickname
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, person("Ada", 30), VisitorOptions::new()).unwrap();
        visitor.rules("Nickname").unwrap().min_length(1).unwrap();

        // WHEN
        let result = visitor.verify().unwrap();

        // THEN
        let message = result.member("Nickname")[0].message.clone().unwrap();
        assert_eq!(
            message,
            "The length should be at least 1, and the current length is 0."
        );
    }

    #[test]
    fn test_quantifiers_on_empty_list() {
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, person("Ada", 30), VisitorOptions::new()).unwrap();
        visitor
            .rules("Tags")
            .unwrap()
            .all(|v| v.as_str().map_or(false, |s| !s.is_empty()))
            .any::<String, _>(|s| s == "admin");

        let result = visitor.verify().unwrap();

        let failed: Vec<&str> = result.failures().map(|o| o.rule_name.as_str()).collect();
        assert_eq!(failed, vec!["Any"]);
    }

    #[test]
    fn test_strict_quantifier_rejects_non_matching_list() {
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, person("Ada", 30), VisitorOptions::strict()).unwrap();
        visitor
            .rules("Tags")
            .unwrap()
            .any::<String, _>(|s| s == "admin");

        assert!(visitor.set("Tags", vec!["guest"]).is_err());
        assert!(visitor.set("Tags", vec!["guest", "admin"]).is_ok());
        assert_eq!(visitor.instance().map(|p| p.tags.len()), Some(2));
    }

    #[test]
    fn test_pattern_rule_rejects_bad_expression() {
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, person("Ada", 30), VisitorOptions::new()).unwrap();

        let err = visitor.rules("Name").unwrap().pattern("[").unwrap_err();

        assert!(matches!(
            err,
            prism_validation::ValidationError::InvalidArgument { .. }
        ));
    }
}
