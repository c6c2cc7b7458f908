//! Shared fixtures for visitor integration tests.

#![allow(dead_code)]

use prism_registry::{MemberSelector, Reflect, ShapeBuilder};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub nickname: Option<String>,
    pub tags: Vec<String>,
}

impl Reflect for Person {
    fn type_name() -> &'static str {
        "Person"
    }

    fn describe(shape: ShapeBuilder<Self>) -> ShapeBuilder<Self> {
        shape
            .field("Name", |p: &Person| p.name.clone(), |p: &mut Person, v| p.name = v)
            .field("Age", |p: &Person| p.age, |p: &mut Person, v| p.age = v)
            .field(
                "Nickname",
                |p: &Person| p.nickname.clone(),
                |p: &mut Person, v| p.nickname = v,
            )
            .field("Tags", |p: &Person| p.tags.clone(), |p: &mut Person, v| p.tags = v)
            .required("Name")
            .default_constructor()
    }
}

pub const NAME: MemberSelector<Person, String> = MemberSelector::new("Name");
pub const AGE: MemberSelector<Person, i64> = MemberSelector::new("Age");

pub fn person(name: &str, age: i64) -> Person {
    Person {
        name: name.to_string(),
        age,
        ..Person::default()
    }
}
