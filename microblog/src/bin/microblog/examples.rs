use crate::commands::{query, tour};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "show",
            groups: query::SHOW_EXAMPLES,
        },
        CommandExample {
            name: "influencers",
            groups: query::QUERY_EXAMPLES,
        },
        CommandExample {
            name: "mentions",
            groups: query::QUERY_EXAMPLES,
        },
        CommandExample {
            name: "written-by",
            groups: query::QUERY_EXAMPLES,
        },
        CommandExample {
            name: "search",
            groups: query::QUERY_EXAMPLES,
        },
        CommandExample {
            name: "check",
            groups: query::CHECK_EXAMPLES,
        },
        CommandExample {
            name: "tour",
            groups: tour::EXAMPLES,
        },
    ]
}
