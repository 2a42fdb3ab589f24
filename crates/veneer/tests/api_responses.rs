//! End-to-end rendering scenarios: a small user/profile/task domain
//! exercised the way an HTTP API layer would drive the engine.

use serde_json::{json, Value};
use veneer::prelude::*;

// ==================== Domain fixtures ====================

struct Profile {
    homepage: &'static str,
    avatar: &'static str,
}

impl Exposed for Profile {
    fn api_type(&self) -> &str {
        "Profile"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "homepage" => Some(self.homepage.into()),
            "avatar" => Some(self.avatar.into()),
            _ => None,
        }
    }

    fn attribute_names(&self) -> Vec<&str> {
        vec!["homepage", "avatar"]
    }
}

struct Task {
    heading: &'static str,
    done: bool,
}

impl Exposed for Task {
    fn api_type(&self) -> &str {
        "Task"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "heading" => Some(self.heading.into()),
            "done" => Some(self.done.into()),
            _ => None,
        }
    }

    fn attribute_names(&self) -> Vec<&str> {
        vec!["heading", "done"]
    }
}

struct User {
    first_name: &'static str,
    last_name: &'static str,
    age: u32,
    profile: Option<Profile>,
    tasks: Vec<Task>,
}

impl User {
    fn han() -> Self {
        Self {
            first_name: "Han",
            last_name: "Solo",
            age: 35,
            profile: None,
            tasks: Vec::new(),
        }
    }

    fn luke() -> Self {
        Self {
            first_name: "Luke",
            last_name: "Skywalker",
            age: 25,
            profile: Some(Profile {
                homepage: "http://www.jedi.org",
                avatar: "luke.png",
            }),
            tasks: vec![
                Task {
                    heading: "find yoda",
                    done: true,
                },
                Task {
                    heading: "destroy deathstar",
                    done: false,
                },
            ],
        }
    }
}

impl Exposed for User {
    fn api_type(&self) -> &str {
        "User"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "first_name" => Some(self.first_name.into()),
            "last_name" => Some(self.last_name.into()),
            "age" => Some(self.age.into()),
            _ => None,
        }
    }

    fn attribute_names(&self) -> Vec<&str> {
        vec!["first_name", "last_name", "age"]
    }

    fn accessor(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "full_name" => Some(Field::Value(
                format!("{} {}", self.first_name, self.last_name).into(),
            )),
            other => self.attribute(other).map(Field::Value),
        }
    }

    fn association(&self, name: &str) -> Option<Related<'_>> {
        match name {
            "profile" => Some(match &self.profile {
                Some(profile) => Related::one(profile),
                None => Related::none(),
            }),
            "tasks" => Some(Related::many(
                self.tasks.iter().map(|t| t as &dyn Exposed),
            )),
            _ => None,
        }
    }
}

// ==================== Engine setup ====================

fn registry() -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();

    registry
        .register(
            "User",
            Template::new("name_only")
                .attribute("first_name")
                .attribute("last_name"),
        )
        .unwrap();
    registry
        .register(
            "User",
            Template::new("include_profile")
                .extends("name_only")
                .association("profile"),
        )
        .unwrap();
    registry
        .register(
            "User",
            Template::new("with_tasks")
                .extends("name_only")
                .association("tasks"),
        )
        .unwrap();
    registry
        .register(
            "User",
            Template::new("public")
                .extends("name_only")
                .attribute("age")
                .only_if(|obj| obj.attribute("age") != Some(json!(35)))
                .method_as("full_name", "name"),
        )
        .unwrap();

    registry
        .register(
            "Profile",
            Template::new("summary").attribute("homepage"),
        )
        .unwrap();
    registry.set_default("Profile", "summary").unwrap();

    registry
        .register("Task", Template::new("summary").attribute("heading"))
        .unwrap();
    registry.set_default("Task", "summary").unwrap();

    registry
}

fn wrapped_config() -> Config {
    Config::default().add_root_node_for("User")
}

// ==================== Singular responses ====================

#[test]
fn single_user_with_root_node() {
    let registry = registry();
    let config = wrapped_config();
    let renderer = Renderer::new(&registry, &config);

    let doc = renderer
        .render_one(&User::han(), &RenderOptions::new().template("name_only"))
        .unwrap();
    assert_eq!(
        doc,
        json!({"user": {"first_name": "Han", "last_name": "Solo"}})
    );
}

#[test]
fn single_user_without_root_node() {
    let registry = registry();
    let config = Config::default();
    let renderer = Renderer::new(&registry, &config);

    let doc = renderer
        .render_one(&User::han(), &RenderOptions::new().template("name_only"))
        .unwrap();
    assert_eq!(doc, json!({"first_name": "Han", "last_name": "Solo"}));
}

#[test]
fn missing_profile_keeps_the_key_with_null() {
    let registry = registry();
    let config = Config::default();
    let renderer = Renderer::new(&registry, &config);

    let doc = renderer
        .render_one(
            &User::han(),
            &RenderOptions::new().template("include_profile"),
        )
        .unwrap();
    assert_eq!(
        doc,
        json!({"first_name": "Han", "last_name": "Solo", "profile": null})
    );
}

#[test]
fn present_profile_uses_its_own_default_template() {
    let registry = registry();
    let config = Config::default();
    let renderer = Renderer::new(&registry, &config);

    let doc = renderer
        .render_one(
            &User::luke(),
            &RenderOptions::new().template("include_profile"),
        )
        .unwrap();
    assert_eq!(
        doc["profile"],
        json!({"homepage": "http://www.jedi.org"})
    );
}

#[test]
fn tasks_render_in_order_through_their_default_template() {
    let registry = registry();
    let config = Config::default();
    let renderer = Renderer::new(&registry, &config);

    let doc = renderer
        .render_one(&User::luke(), &RenderOptions::new().template("with_tasks"))
        .unwrap();
    assert_eq!(
        doc["tasks"],
        json!([{"heading": "find yoda"}, {"heading": "destroy deathstar"}])
    );
}

#[test]
fn inheritance_conditions_and_renames_compose() {
    let registry = registry();
    let config = Config::default();
    let renderer = Renderer::new(&registry, &config);

    // Han is 35, so the conditional age field is omitted entirely.
    let doc = renderer
        .render_one(&User::han(), &RenderOptions::new().template("public"))
        .unwrap();
    let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["first_name", "last_name", "name"]);
    assert_eq!(doc["name"], json!("Han Solo"));

    let doc = renderer
        .render_one(&User::luke(), &RenderOptions::new().template("public"))
        .unwrap();
    let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["first_name", "last_name", "age", "name"]);
}

// ==================== Collection responses ====================

#[test]
fn user_collection_under_plural_root() {
    let registry = registry();
    let config = wrapped_config();
    let renderer = Renderer::new(&registry, &config);

    let han = User::han();
    let luke = User::luke();
    let users: Vec<&dyn Exposed> = vec![&han, &luke];

    let doc = renderer
        .render_many(users, &RenderOptions::new().template("name_only"))
        .unwrap();
    assert_eq!(
        doc,
        json!({"users": [
            {"first_name": "Han", "last_name": "Solo"},
            {"first_name": "Luke", "last_name": "Skywalker"}
        ]})
    );
}

#[test]
fn user_collection_with_legacy_element_roots() {
    let registry = registry();
    let config = wrapped_config().include_root_in_collections(true);
    let renderer = Renderer::new(&registry, &config);

    let han = User::han();
    let luke = User::luke();
    let users: Vec<&dyn Exposed> = vec![&han, &luke];

    let doc = renderer
        .render_many(users, &RenderOptions::new().template("name_only"))
        .unwrap();
    assert_eq!(
        doc,
        json!({"users": [
            {"user": {"first_name": "Han", "last_name": "Solo"}},
            {"user": {"first_name": "Luke", "last_name": "Skywalker"}}
        ]})
    );
}

#[test]
fn mixed_collection_elements_resolve_their_own_type_and_root_key() {
    let mut registry = registry();
    registry.set_default("User", "name_only").unwrap();
    let config = Config::default()
        .add_root_node_for("User")
        .add_root_node_for("Task")
        .include_root_in_collections(true);
    let renderer = Renderer::new(&registry, &config);

    let han = User::han();
    let task = Task {
        heading: "kessel run",
        done: true,
    };
    // The collection key comes from the first element's type; each element
    // is wrapped under its own singular key.
    let mixed: Vec<&dyn Exposed> = vec![&han, &task];

    let doc = renderer.render_many(mixed, &RenderOptions::new()).unwrap();
    assert_eq!(
        doc,
        json!({"users": [
            {"user": {"first_name": "Han", "last_name": "Solo"}},
            {"task": {"heading": "kessel run"}}
        ]})
    );
}

#[test]
fn user_collection_without_root_nodes_is_a_bare_array() {
    let registry = registry();
    let config = Config::default();
    let renderer = Renderer::new(&registry, &config);

    let han = User::han();
    let users: Vec<&dyn Exposed> = vec![&han];

    let doc = renderer
        .render_many(users, &RenderOptions::new().template("name_only"))
        .unwrap();
    assert_eq!(doc, json!([{"first_name": "Han", "last_name": "Solo"}]));
}

// ==================== Options ====================

#[test]
fn meta_entries_sit_next_to_the_root_key() {
    let registry = registry();
    let config = wrapped_config();
    let renderer = Renderer::new(&registry, &config);

    let han = User::han();
    let users: Vec<&dyn Exposed> = vec![&han];

    let doc = renderer
        .render_many(
            users,
            &RenderOptions::new()
                .template("name_only")
                .meta("page", 1)
                .meta("total", 27),
        )
        .unwrap();

    let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["users", "page", "total"]);
    assert_eq!(doc["total"], json!(27));
}

#[test]
fn prefix_and_postfix_wrap_the_singular_document() {
    let registry = registry();
    let config = wrapped_config();
    let renderer = Renderer::new(&registry, &config);

    let doc = renderer
        .render_one(
            &User::han(),
            &RenderOptions::new()
                .template("name_only")
                .prefix(json!({"generator": "veneer"})),
        )
        .unwrap();

    let keys: Vec<&String> = doc["user"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["prefix", "first_name", "last_name"]);
    assert!(doc["user"].get("postfix").is_none());
}

#[test]
fn explicit_root_key_beats_the_derived_one() {
    let registry = registry();
    let config = wrapped_config();
    let renderer = Renderer::new(&registry, &config);

    let doc = renderer
        .render_one(
            &User::han(),
            &RenderOptions::new().template("name_only").root("member"),
        )
        .unwrap();
    assert!(doc.get("member").is_some());
    assert!(doc.get("user").is_none());
}

// ==================== Failure modes ====================

#[test]
fn unknown_template_name_is_reported_with_both_names() {
    let registry = registry();
    let config = Config::default();
    let renderer = Renderer::new(&registry, &config);

    let err = renderer
        .render_one(&User::han(), &RenderOptions::new().template("admin"))
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("admin"));
    assert!(message.contains("User"));
}

#[test]
fn repeated_renders_are_structurally_identical() {
    let registry = registry();
    let config = wrapped_config();
    let renderer = Renderer::new(&registry, &config);
    let options = RenderOptions::new().template("with_tasks").meta("page", 1);

    let luke = User::luke();
    let first = renderer.render_one(&luke, &options).unwrap();
    let second = renderer.render_one(&luke, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn renders_are_atomic_on_field_failure() {
    let mut registry = registry();
    registry
        .register(
            "User",
            Template::new("broken")
                .attribute("first_name")
                .attribute("midichlorians"),
        )
        .unwrap();
    let config = Config::default();
    let renderer = Renderer::new(&registry, &config);

    let result = renderer.render_one(&User::han(), &RenderOptions::new().template("broken"));
    assert!(matches!(
        result,
        Err(RenderError::FieldResolution { .. })
    ));
}
