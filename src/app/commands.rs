use crate::app::render::{write_course, write_course_list, write_json};
use crate::core::CatalogSession;
use crate::utils::error::Result;
use std::io::Write;

pub fn list<W: Write>(session: &CatalogSession, out: &mut W, json: bool) -> Result<()> {
    let courses = session.courses()?;
    tracing::debug!("Listing {} courses", courses.len());

    if json {
        write_json(out, &courses)
    } else {
        write_course_list(out, &courses)
    }
}

pub fn show<W: Write>(session: &CatalogSession, id: &str, out: &mut W, json: bool) -> Result<()> {
    let course = session.lookup(id)?;

    if json {
        write_json(out, &course)
    } else {
        write_course(out, &course)
    }
}
