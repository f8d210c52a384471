use crate::domain::model::{CourseDetails, CourseSummary};
use crate::utils::error::Result;
use std::io::Write;

/// 每門課一行 `ID, 名稱`，最後空一行
pub fn write_course_list<W: Write>(out: &mut W, courses: &[CourseSummary]) -> Result<()> {
    for course in courses {
        writeln!(out, "{}, {}", course.id, course.title)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_course<W: Write>(out: &mut W, course: &CourseDetails) -> Result<()> {
    writeln!(out, "{}, {}", course.id, course.title)?;

    if course.prerequisites.is_empty() {
        writeln!(out, "Prerequisites: None")?;
    } else {
        writeln!(out, "Prerequisites: {}", course.prerequisites.join(", "))?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_course_with_prerequisites() {
        let course = CourseDetails {
            id: "CSCI300".to_string(),
            title: "Introduction to Algorithms".to_string(),
            prerequisites: vec!["CSCI200".to_string(), "MATH201".to_string()],
        };

        assert_eq!(
            render(|out| write_course(out, &course)),
            "CSCI300, Introduction to Algorithms\nPrerequisites: CSCI200, MATH201\n\n"
        );
    }

    #[test]
    fn test_course_without_prerequisites() {
        let course = CourseDetails {
            id: "CSCI100".to_string(),
            title: "Introduction to Computer Science".to_string(),
            prerequisites: Vec::new(),
        };

        assert!(render(|out| write_course(out, &course)).contains("Prerequisites: None\n"));
    }

    #[test]
    fn test_json_list() {
        let courses = vec![CourseSummary {
            id: "CSCI100".to_string(),
            title: "Intro".to_string(),
        }];

        let json = render(|out| write_json(out, &courses));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["id"], "CSCI100");
        assert_eq!(parsed[0]["title"], "Intro");
    }
}
