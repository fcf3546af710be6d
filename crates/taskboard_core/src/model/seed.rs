//! Built-in seed data shown when storage holds nothing usable.

use crate::model::project::{Project, Task};

/// Returns the fixed default project list.
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Website Redesign".to_string(),
            tasks: vec![
                Task {
                    id: 1,
                    title: "Draft wireframes".to_string(),
                    completed: true,
                },
                Task::new(2, "Choose color palette"),
                Task::new(3, "Build landing page"),
            ],
        },
        Project {
            id: 2,
            name: "Mobile App".to_string(),
            tasks: vec![
                Task {
                    id: 1,
                    title: "Set up project skeleton".to_string(),
                    completed: true,
                },
                Task::new(2, "Design onboarding flow"),
            ],
        },
    ]
}
