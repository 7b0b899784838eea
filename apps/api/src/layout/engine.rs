//! Resume layout engine.
//!
//! # Pass structure
//! 1. Content pass: header, optional full-width summary, then the two-column
//!    body. Experience and Education stack in the left column, Skills and
//!    Projects in the right, Certifications in whichever column ends higher.
//! 2. Footer pass: once every page exists, revisit each one and stamp
//!    "Page i of N".
//! 3. Serialize the buffered pages with `pdf::write_pdf`.
//!
//! Every section is optional and is skipped when its data is empty. The input
//! record is only borrowed; rendering the same record twice yields the same bytes.

use bytes::Bytes;
use tracing::debug;

use crate::models::resume::{
    present, CertificationEntry, EducationEntry, ExperienceEntry, Personal, ProjectEntry,
    ResumeRecord, Skills,
};

use super::canvas::{Align, Canvas, TextOptions};
use super::columns::{roomier, Column, ColumnTracker, FlowPosition};
use super::error::RenderError;
use super::font_metrics::line_height;
use super::geometry::PageGeometry;
use super::pdf::write_pdf;
use super::style::{self, TextStyle, RULE};
use super::wrap::Run;

pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Width of the rule drawn under every section title.
const SECTION_UNDERLINE_WIDTH: f32 = 150.0;
const TITLE_OFFSET: f32 = 25.0;
const CONTACT_OFFSET: f32 = 50.0;
const CONTACT_STEP: f32 = 15.0;
const BULLET_INDENT: f32 = 10.0;

/// A finished PDF.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Bytes,
    pub page_count: usize,
}

/// Where the content pass put things.
#[derive(Debug, Clone)]
pub struct LayoutSummary {
    pub page_count: usize,
    /// `None` when the record has no certifications.
    pub certifications_column: Option<Column>,
    pub left_bottom: FlowPosition,
    pub right_bottom: FlowPosition,
}

/// Renders `record` into a PDF.
pub fn render_resume(
    record: &ResumeRecord,
    geometry: &PageGeometry,
) -> Result<RenderedDocument, RenderError> {
    let (canvas, summary) = compose(record, geometry)?;
    let title = present(&record.personal.name).unwrap_or(NAME_PLACEHOLDER);
    let (geometry, pages) = canvas.into_parts();
    let bytes = write_pdf(&geometry, &pages, title)?;
    Ok(RenderedDocument {
        bytes: Bytes::from(bytes),
        page_count: summary.page_count,
    })
}

/// Runs the content and footer passes, returning the buffered canvas.
pub fn compose(
    record: &ResumeRecord,
    geometry: &PageGeometry,
) -> Result<(Canvas, LayoutSummary), RenderError> {
    let mut canvas = Canvas::new(geometry.clone());

    draw_header(&mut canvas, &record.personal)?;

    if let Some(about) = present(&record.personal.about) {
        draw_summary(&mut canvas, about)?;
    }

    let body_top = FlowPosition {
        page: canvas.current_page(),
        y: canvas.y,
    };
    let mut left = ColumnTracker::new(
        Column::Left,
        geometry.left_column_x,
        geometry.column_width,
        body_top,
    );
    let mut right = ColumnTracker::new(
        Column::Right,
        geometry.right_column_x,
        geometry.column_width,
        body_top,
    );

    if !record.experience.is_empty() {
        left.append(&mut canvas, |c, width| {
            draw_experience(c, width, &record.experience)
        })?;
        debug!(entries = record.experience.len(), "placed work experience");
    }

    if !record.education.is_empty() {
        left.append(&mut canvas, |c, width| {
            draw_education(c, width, &record.education)
        })?;
        debug!(entries = record.education.len(), "placed education");
    }

    if !record.skills.is_empty() {
        right.append(&mut canvas, |c, width| draw_skills(c, width, &record.skills))?;
        debug!("placed skills");
    }

    if !record.projects.is_empty() {
        right.append(&mut canvas, |c, width| {
            draw_projects(c, width, &record.projects)
        })?;
        debug!(entries = record.projects.len(), "placed projects");
    }

    let mut certifications_column = None;
    if !record.certifications.is_empty() {
        let column = roomier(&mut left, &mut right);
        column.append(&mut canvas, |c, width| {
            draw_certifications(c, width, &record.certifications)
        })?;
        debug!(column = ?column.column, "placed certifications");
        certifications_column = Some(column.column);
    }

    stamp_page_numbers(&mut canvas)?;

    let summary = LayoutSummary {
        page_count: canvas.page_count(),
        certifications_column,
        left_bottom: left.current_height(),
        right_bottom: right.current_height(),
    };
    Ok((canvas, summary))
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

enum Contact<'a> {
    Plain(&'a str),
    Link { label: &'static str, uri: &'a str },
}

fn draw_header(canvas: &mut Canvas, personal: &Personal) -> Result<(), RenderError> {
    let geometry = canvas.geometry().clone();
    let left = geometry.content_left();
    let top = geometry.content_top();

    let name = present(&personal.name).unwrap_or(NAME_PLACEHOLDER);
    canvas.stamp(&[Run::new(name, style::NAME)], left, top, &TextOptions::default())?;

    if let Some(title) = present(&personal.title) {
        canvas.stamp(
            &[Run::new(title, style::HEADLINE)],
            left,
            top + TITLE_OFFSET,
            &TextOptions::default(),
        )?;
    }

    let mut contacts = Vec::new();
    for value in [&personal.address, &personal.phone, &personal.email] {
        if let Some(text) = present(value) {
            contacts.push(Contact::Plain(text));
        }
    }
    if let Some(uri) = present(&personal.linkedin) {
        contacts.push(Contact::Link {
            label: "LinkedIn",
            uri,
        });
    }
    if let Some(uri) = present(&personal.github) {
        contacts.push(Contact::Link { label: "GitHub", uri });
    }

    let mut contact_y = top + CONTACT_OFFSET;
    for contact in contacts {
        match contact {
            Contact::Plain(text) => canvas.stamp(
                &[Run::new(text, style::CONTACT)],
                left,
                contact_y,
                &TextOptions::default(),
            )?,
            Contact::Link { label, uri } => canvas.stamp(
                &[Run::new(label, style::CONTACT)],
                left,
                contact_y,
                &TextOptions {
                    link: Some(uri),
                    underline: true,
                    ..Default::default()
                },
            )?,
        }
        contact_y += CONTACT_STEP;
    }

    canvas.stroke(
        (left, contact_y + 10.0),
        (geometry.content_right(), contact_y + 10.0),
        1.0,
        RULE,
    );
    canvas.move_to(left, contact_y + 20.0);
    Ok(())
}

fn draw_summary(canvas: &mut Canvas, about: &str) -> Result<(), RenderError> {
    let geometry = canvas.geometry().clone();
    let width = geometry.summary_width.min(geometry.content_width());
    canvas.move_to(geometry.content_left(), canvas.y);
    draw_section_header(canvas, "Professional Summary", width)?;
    canvas.text(
        &[Run::new(about, style::SUMMARY)],
        &TextOptions {
            width: Some(width),
            line_gap: 5.0,
            ..Default::default()
        },
    )?;
    canvas.move_down(1.5, style::SUMMARY.size);
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Shared primitives
// ────────────────────────────────────────────────────────────────────────────

/// Uppercased bold title with a short rule beneath it, at the cursor.
fn draw_section_header(canvas: &mut Canvas, title: &str, width: f32) -> Result<(), RenderError> {
    let title_style = style::SECTION_TITLE;
    // Title plus at least one line of body, so a header never ends a page.
    canvas.ensure_space(5.0 + line_height(title_style.size) + line_height(style::BODY.size));

    let x = canvas.x;
    let top = canvas.y;
    canvas.y = top + 5.0;
    let upper = title.to_uppercase();
    canvas.text(
        &[Run::new(&upper, title_style)],
        &TextOptions {
            width: Some(width),
            ..Default::default()
        },
    )?;
    canvas.stroke(
        (x, top + 22.0),
        (x + SECTION_UNDERLINE_WIDTH.min(width), top + 22.0),
        1.0,
        RULE,
    );
    canvas.move_down(1.2, title_style.size);
    Ok(())
}

fn line(canvas: &mut Canvas, text: &str, style: TextStyle, width: f32) -> Result<(), RenderError> {
    canvas.text(
        &[Run::new(text, style)],
        &TextOptions {
            width: Some(width),
            ..Default::default()
        },
    )
}

fn link_line(canvas: &mut Canvas, label: &str, uri: &str, width: f32) -> Result<(), RenderError> {
    canvas.text(
        &[Run::new(label, style::BODY)],
        &TextOptions {
            width: Some(width),
            link: Some(uri),
            underline: true,
            ..Default::default()
        },
    )
}

/// `"{start} - {end}"`, with `end_default` standing in for a missing end.
/// `None` when neither end of the range is present.
pub fn date_range(
    start: &Option<String>,
    end: &Option<String>,
    end_default: &str,
) -> Option<String> {
    let start = present(start);
    let end = present(end);
    if start.is_none() && end.is_none() {
        return None;
    }
    Some(format!(
        "{} - {}",
        start.unwrap_or(""),
        end.unwrap_or(end_default)
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn draw_experience(
    canvas: &mut Canvas,
    width: f32,
    entries: &[ExperienceEntry],
) -> Result<(), RenderError> {
    draw_section_header(canvas, "Work Experience", width)?;

    for entry in entries {
        let title = present(&entry.title);
        let company = present(&entry.company);
        let at_company = company.map(|c| format!(" at {c}"));
        let runs: Vec<Run<'_>> = match (title, company, at_company.as_deref()) {
            (Some(t), Some(_), Some(at)) => vec![
                Run::new(t, style::ENTRY_TITLE),
                Run::new(at, style::ENTRY_SUBTITLE),
            ],
            (Some(t), _, _) => vec![Run::new(t, style::ENTRY_TITLE)],
            (None, Some(c), _) => vec![Run::new(c, style::ENTRY_SUBTITLE)],
            (None, None, _) => Vec::new(),
        };
        if !runs.is_empty() {
            canvas.text(
                &runs,
                &TextOptions {
                    width: Some(width),
                    ..Default::default()
                },
            )?;
        }

        if let Some(dates) = date_range(&entry.start_date, &entry.end_date, "Present") {
            line(canvas, &dates, style::DATES, width)?;
        }

        for bullet in entry.description.iter().filter(|d| !d.trim().is_empty()) {
            let text = format!("• {}", bullet.trim());
            canvas.text(
                &[Run::new(&text, style::BODY)],
                &TextOptions {
                    width: Some(width),
                    indent: BULLET_INDENT,
                    line_gap: 3.0,
                    paragraph_gap: 2.0,
                    ..Default::default()
                },
            )?;
        }

        canvas.move_down(0.8, style::BODY.size);
    }
    Ok(())
}

fn draw_education(
    canvas: &mut Canvas,
    width: f32,
    entries: &[EducationEntry],
) -> Result<(), RenderError> {
    draw_section_header(canvas, "Education", width)?;

    for entry in entries {
        if let Some(degree) = present(&entry.degree) {
            line(canvas, degree, style::ENTRY_TITLE, width)?;
        }
        if let Some(university) = present(&entry.university) {
            line(canvas, university, style::ENTRY_SUBTITLE, width)?;
        }
        // Unlike experience, a missing end date stays blank.
        if let Some(dates) = date_range(&entry.start_date, &entry.end_date, "") {
            line(canvas, &dates, style::DATES, width)?;
        }
        if let Some(gpa) = present(&entry.gpa) {
            line(canvas, &format!("GPA: {gpa}"), style::BODY, width)?;
        }
        canvas.move_down(0.8, style::BODY.size);
    }
    Ok(())
}

fn draw_skills(canvas: &mut Canvas, width: f32, skills: &Skills) -> Result<(), RenderError> {
    draw_section_header(canvas, "Skills", width)?;

    let groups = [
        ("LANGUAGES", &skills.languages),
        ("FRAMEWORKS & LIBRARIES", &skills.frameworks),
        ("TOOLS & TECHNOLOGIES", &skills.tools),
    ];
    for (caption, items) in groups {
        if items.is_empty() {
            continue;
        }
        canvas.text(
            &[Run::new(caption, style::ITEM_TITLE)],
            &TextOptions {
                width: Some(width),
                paragraph_gap: 3.0,
                ..Default::default()
            },
        )?;
        canvas.text(
            &[Run::new(&items.join(", "), style::BODY)],
            &TextOptions {
                width: Some(width),
                paragraph_gap: 8.0,
                ..Default::default()
            },
        )?;
    }
    Ok(())
}

fn draw_projects(
    canvas: &mut Canvas,
    width: f32,
    entries: &[ProjectEntry],
) -> Result<(), RenderError> {
    draw_section_header(canvas, "Projects", width)?;

    for entry in entries {
        if let Some(title) = present(&entry.project_title) {
            line(canvas, title, style::ITEM_TITLE, width)?;
        }
        if let Some(link) = present(&entry.project_link) {
            link_line(canvas, "View Project", link, width)?;
        }
        if let Some(description) = present(&entry.project_description) {
            canvas.text(
                &[Run::new(description, style::BODY)],
                &TextOptions {
                    width: Some(width),
                    line_gap: 4.0,
                    paragraph_gap: 5.0,
                    ..Default::default()
                },
            )?;
        }
        canvas.move_down(0.6, style::BODY.size);
    }
    Ok(())
}

fn draw_certifications(
    canvas: &mut Canvas,
    width: f32,
    entries: &[CertificationEntry],
) -> Result<(), RenderError> {
    draw_section_header(canvas, "Certifications", width)?;

    for entry in entries {
        if let Some(name) = present(&entry.name) {
            line(canvas, name, style::ITEM_TITLE, width)?;
        }
        if let Some(link) = present(&entry.link) {
            link_line(canvas, "View Certificate", link, width)?;
        }
        if let Some(date) = present(&entry.date) {
            line(canvas, &format!("Issued: {date}"), style::DATES, width)?;
        }
        canvas.move_down(0.6, style::BODY.size);
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Footer pass
// ────────────────────────────────────────────────────────────────────────────

fn stamp_page_numbers(canvas: &mut Canvas) -> Result<(), RenderError> {
    let geometry = canvas.geometry().clone();
    let total = canvas.page_count();
    let y = geometry.height - geometry.footer_offset;
    let opts = TextOptions {
        width: Some(geometry.content_width()),
        align: Align::Center,
        ..Default::default()
    };

    for index in 0..total {
        canvas.switch_to_page(index)?;
        let label = format!("Page {} of {}", index + 1, total);
        canvas.stamp(
            &[Run::new(&label, style::FOOTER)],
            geometry.content_left(),
            y,
            &opts,
        )?;
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
