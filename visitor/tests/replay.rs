//! History recording and replay.

mod common;

use common::{person, Person, AGE, NAME};
use prism_core::attrs;
use prism_journal::JournalError;
use prism_registry::{AccessError, Registry};
use prism_visitor::{Visitor, VisitorError, VisitorOptions};

fn is_not_supported(err: &VisitorError) -> bool {
    matches!(err, VisitorError::Journal(JournalError::NotSupported { .. }))
}

mod repeat {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replay_is_deterministic() {
        // GIVEN
        let registry = Registry::new();
        let start = Person {
            tags: vec!["keep".to_string()],
            ..person("", 0)
        };
        let mut visitor = Visitor::for_instance(&registry, start, VisitorOptions::repeatable()).unwrap();
        visitor.set_selected(NAME, "Ada".to_string()).unwrap();
        visitor.set_selected(AGE, 35).unwrap();
        visitor.set_selected(AGE, 36).unwrap();

        // WHEN
        let mut repeater = visitor.for_repeat();
        let replayed = repeater.repeat().unwrap().clone();
        let fresh = repeater.repeat_onto(Person::default()).unwrap();

        // THEN every member touched by the log agrees
        assert_eq!(replayed.name, fresh.name);
        assert_eq!(replayed.age, fresh.age);
        assert_eq!(fresh.age, 36);
        assert_eq!(replayed.tags, vec!["keep".to_string()]);
        assert!(fresh.tags.is_empty());
    }

    #[test]
    fn test_replay_does_not_grow_the_log() {
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, Person::default(), VisitorOptions::repeatable())
                .unwrap();
        visitor.set("Age", 1i64).unwrap();

        {
            let mut repeater = visitor.for_repeat();
            repeater.repeat().unwrap();
            repeater.repeat_onto(Person::default()).unwrap();
        }

        assert_eq!(visitor.history().unwrap().len(), 1);
    }

    #[test]
    fn test_repeat_onto_many_instances() {
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, Person::default(), VisitorOptions::repeatable())
                .unwrap();
        visitor.set("Nickname", "ace").unwrap();

        let repeater = visitor.for_repeat();
        let first = repeater.repeat_onto(person("Bob", 50)).unwrap();
        let second = repeater.repeat_onto(person("Cy", 20)).unwrap();

        assert_eq!(first.nickname.as_deref(), Some("ace"));
        assert_eq!(second.nickname.as_deref(), Some("ace"));
        assert_eq!(first.name, "Bob");
    }
}

mod overrides {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides_win_over_history() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, Person::default(), VisitorOptions::repeatable())
                .unwrap();
        visitor.set("Name", "Ada").unwrap();
        visitor.set("Age", 36i64).unwrap();

        // WHEN
        let built = visitor
            .for_repeat()
            .repeat_with(attrs! { "Age" => 40i64 })
            .unwrap();

        // THEN
        assert_eq!(built, person("Ada", 40));
    }

    #[test]
    fn test_overrides_can_supply_required_members() {
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, Person::default(), VisitorOptions::repeatable())
                .unwrap();
        visitor.set("Age", 36i64).unwrap();

        let repeater = visitor.for_repeat();
        let err = repeater.repeat_with(attrs! {}).unwrap_err();
        let built = repeater.repeat_with(attrs! { "Name" => "Eve" }).unwrap();

        assert!(matches!(
            err,
            VisitorError::Access(AccessError::MissingRequired { .. })
        ));
        assert_eq!(built, person("Eve", 36));
    }
}

mod unsupported {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_non_repeatable_session() {
        let registry = Registry::new();
        let mut visitor =
            Visitor::for_instance(&registry, Person::default(), VisitorOptions::new()).unwrap();
        visitor.set("Age", 3i64).unwrap();

        let mut repeater = visitor.for_repeat();

        assert!(!repeater.is_supported());
        assert!(is_not_supported(&repeater.repeat().unwrap_err()));
        assert!(is_not_supported(
            &repeater.repeat_onto(Person::default()).unwrap_err()
        ));
        assert!(is_not_supported(&repeater.repeat_with(attrs! {}).unwrap_err()));
    }

    #[test]
    fn test_future_instance_before_materialization() {
        // GIVEN
        let registry = Registry::new();
        let mut visitor = Visitor::<Person>::for_future_instance(
            &registry,
            attrs! { "Name" => "Ada" },
            VisitorOptions::repeatable(),
        )
        .unwrap();

        // THEN the bound instance does not exist yet
        assert!(is_not_supported(&visitor.for_repeat().repeat().unwrap_err()));

        // WHEN
        visitor.materialize().unwrap();

        // THEN
        let replayed = visitor.for_repeat().repeat().unwrap().clone();
        assert_eq!(replayed.name, "Ada");
    }
}
