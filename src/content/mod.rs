//! Static course catalog, compiled into the binary. Courses, modules and
//! lessons are immutable; the database never stores them, user documents
//! reference them by id.

pub mod lessons;

use lazy_static::lazy_static;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub level: &'static str,
    pub image_url: &'static str,
    pub color: &'static str,
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip)]
    pub content: &'static str,
    pub duration_minutes: u32,
}

lazy_static! {
    pub static ref COURSES: Vec<Course> = build_catalog();
}

fn build_catalog() -> Vec<Course> {
    vec![
        Course {
            id: "computer-basics",
            title: "Computer Basics",
            description: "Get comfortable with the machine: hardware, the desktop and your files.",
            level: "Beginner",
            image_url: "/assets/courses/computer-basics.png",
            color: "bg-sky-600",
            modules: vec![
                Module {
                    id: "comp-hardware",
                    title: "Hardware and input",
                    description: "What the parts are and how to drive them.",
                    icon: "Monitor",
                    lessons: vec![
                        Lesson {
                            id: "what-is-pc",
                            title: "What is computer hardware?",
                            content: lessons::COMP_BASICS_LESSON_1,
                            duration_minutes: 10,
                        },
                        Lesson {
                            id: "mouse-key",
                            title: "Using the mouse and keyboard",
                            content: lessons::COMP_BASICS_LESSON_2,
                            duration_minutes: 15,
                        },
                    ],
                },
                Module {
                    id: "windows-os",
                    title: "Working in Windows",
                    description: "The desktop, the Start menu and folders.",
                    icon: "Layout",
                    lessons: vec![
                        Lesson {
                            id: "desktop-intro",
                            title: "The desktop and the Start menu",
                            content: lessons::COMP_BASICS_LESSON_3,
                            duration_minutes: 10,
                        },
                        Lesson {
                            id: "folder-mgt",
                            title: "Creating and organizing folders",
                            content: lessons::COMP_BASICS_LESSON_4,
                            duration_minutes: 15,
                        },
                    ],
                },
            ],
        },
        Course {
            id: "ms-word",
            title: "Microsoft Word",
            description: "Write, format and save documents.",
            level: "Beginner",
            image_url: "/assets/courses/ms-word.png",
            color: "bg-blue-700",
            modules: vec![
                Module {
                    id: "word-module-1",
                    title: "Getting to know Word",
                    description: "The window, the ribbon and your first document.",
                    icon: "FileText",
                    lessons: vec![
                        Lesson {
                            id: "word-lesson-1",
                            title: "What is Microsoft Word?",
                            content: lessons::WORD_LESSON_1,
                            duration_minutes: 15,
                        },
                        Lesson {
                            id: "word-lesson-2",
                            title: "Opening Word and starting a document",
                            content: lessons::WORD_LESSON_2,
                            duration_minutes: 15,
                        },
                    ],
                },
                Module {
                    id: "word-module-2",
                    title: "Formatting",
                    description: "Bold, fonts and layout, used with restraint.",
                    icon: "Type",
                    lessons: vec![Lesson {
                        id: "word-lesson-3",
                        title: "Formatting text (exercise)",
                        content: lessons::WORD_LESSON_3,
                        duration_minutes: 20,
                    }],
                },
            ],
        },
        Course {
            id: "ms-excel",
            title: "Microsoft Excel",
            description: "The grid, cells and your first formulas.",
            level: "Beginner",
            image_url: "/assets/courses/ms-excel.png",
            color: "bg-emerald-700",
            modules: vec![Module {
                id: "excel-module-1",
                title: "Spreadsheet fundamentals",
                description: "Cells, addresses and SUM.",
                icon: "Table",
                lessons: vec![
                    Lesson {
                        id: "excel-lesson-1",
                        title: "Meet the spreadsheet",
                        content: lessons::EXCEL_LESSON_1,
                        duration_minutes: 10,
                    },
                    Lesson {
                        id: "excel-lesson-2",
                        title: "Your first formula (exercise)",
                        content: lessons::EXCEL_LESSON_2,
                        duration_minutes: 20,
                    },
                ],
            }],
        },
    ]
}

pub fn find_course(course_id: &str) -> Option<&'static Course> {
    COURSES.iter().find(|c| c.id == course_id)
}

pub fn find_lesson(
    course_id: &str,
    module_id: &str,
    lesson_id: &str,
) -> Option<(&'static Course, &'static Module, &'static Lesson)> {
    let course = find_course(course_id)?;
    let module = course.modules.iter().find(|m| m.id == module_id)?;
    let lesson = module.lessons.iter().find(|l| l.id == lesson_id)?;
    Some((course, module, lesson))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_not_empty() {
        assert!(!COURSES.is_empty());
        for course in COURSES.iter() {
            assert!(!course.modules.is_empty(), "course {} has no modules", course.id);
            for module in &course.modules {
                assert!(!module.lessons.is_empty(), "module {} is empty", module.id);
            }
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut course_ids = HashSet::new();
        for course in COURSES.iter() {
            assert!(course_ids.insert(course.id), "duplicate course id {}", course.id);

            let mut module_ids = HashSet::new();
            let mut lesson_ids = HashSet::new();
            for module in &course.modules {
                assert!(module_ids.insert(module.id), "duplicate module id {}", module.id);
                for lesson in &module.lessons {
                    assert!(
                        lesson_ids.insert(lesson.id),
                        "duplicate lesson id {} in course {}",
                        lesson.id,
                        course.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_find_lesson() {
        let (course, module, lesson) =
            find_lesson("ms-word", "word-module-1", "word-lesson-2").unwrap();
        assert_eq!(course.id, "ms-word");
        assert_eq!(module.id, "word-module-1");
        assert_eq!(lesson.title, "Opening Word and starting a document");
        assert!(find_lesson("ms-word", "word-module-1", "nope").is_none());
        assert!(find_lesson("ms-word", "excel-module-1", "excel-lesson-1").is_none());
    }

    #[test]
    fn test_every_lesson_renders() {
        for course in COURSES.iter() {
            for module in &course.modules {
                for lesson in &module.lessons {
                    let blocks = crate::render::render(lesson.content);
                    assert!(!blocks.is_empty(), "lesson {} rendered empty", lesson.id);
                }
            }
        }
    }

    #[test]
    fn test_lesson_content_not_in_catalog_json() {
        let json = serde_json::to_value(&*COURSES).unwrap();
        let first = &json[0]["modules"][0]["lessons"][0];
        assert!(first.get("content").is_none());
        assert!(first.get("durationMinutes").is_some());
    }
}
