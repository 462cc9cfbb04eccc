// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ConditionalRule, Field, FieldKind, FileConstraints, FileRef, FormSchema, RuleOperator,
    RuleValue,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const fn create_test_time() -> OffsetDateTime {
    datetime!(2026-03-01 9:00 UTC)
}

pub fn create_test_file(name: &str, mime_type: &str, size_bytes: u64) -> FileRef {
    FileRef {
        id: format!("file-{name}"),
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        size_bytes,
        url: format!("https://files.example.org/{name}"),
        uploaded_at: create_test_time(),
    }
}

/// A survey with a leading standalone field, a branching choice and a section.
pub fn create_test_schema() -> FormSchema {
    FormSchema::new(
        "form-1",
        "Center survey",
        vec![
            Field::new("name", FieldKind::Text, "Center name").required(),
            Field::new("has_lab", FieldKind::Radio, "Has a lab?")
                .with_options(&["yes", "no"])
                .required()
                .with_rule(ConditionalRule::jump_to_field(
                    "has_lab",
                    RuleOperator::Equals,
                    RuleValue::Single(String::from("no")),
                    "comments",
                )),
            Field::section(
                "lab",
                "Lab details",
                vec![
                    Field::new("lab_size", FieldKind::Number, "Lab size").required(),
                    Field::new("equipment", FieldKind::Checkbox, "Equipment")
                        .with_options(&["printer", "laser", "lathe"]),
                    Field::new("photos", FieldKind::File, "Photos").with_file_constraints(
                        FileConstraints {
                            allowed_types: vec![String::from("image/*"), String::from(".pdf")],
                            max_size_bytes: Some(1_000),
                            multiple: false,
                        },
                    ),
                ],
            ),
            Field::new("comments", FieldKind::TextArea, "Comments"),
        ],
    )
}
