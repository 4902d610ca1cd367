//! Markdown report card renderer.
//!
//! Lays out a report card as a fixed sequence of markdown sections: the
//! letterhead, student information, the grades table with totals, the GPA
//! scale reference, remarks and the signature block.

use std::fmt::Write;

use crate::domain::grading::{GradeBand, GradeLetter, GradeScale, GradedCourse, ReportCard};
use crate::ports::{RenderError, ReportRenderer};

/// Institution details printed on every card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letterhead {
    pub institution_name: String,
    pub college_name: String,
    pub signatory_title: String,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            institution_name: "State University".to_string(),
            college_name: "College of Technology".to_string(),
            signatory_title: "Program Director".to_string(),
        }
    }
}

/// Renders report cards as markdown tables.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReportRenderer {
    letterhead: Letterhead,
}

impl MarkdownReportRenderer {
    pub fn new(letterhead: Letterhead) -> Self {
        Self { letterhead }
    }

    fn write_header(&self, out: &mut String) -> Result<(), RenderError> {
        writeln!(out, "# {}", cell(&self.letterhead.institution_name))?;
        writeln!(out)?;
        writeln!(out, "## {}", cell(&self.letterhead.college_name))?;
        writeln!(out)?;
        writeln!(out, "### STUDENT REPORT CARD")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_student(&self, out: &mut String, card: &ReportCard) -> Result<(), RenderError> {
        let student = card.student();
        writeln!(out, "## Student Information")?;
        writeln!(out)?;
        match &student.portrait_url {
            Some(url) => writeln!(out, "![{}]({})", cell(&student.full_name()), url)?,
            None => writeln!(out, "**[{}]**", student.initials())?,
        }
        writeln!(out)?;
        writeln!(out, "| | |")?;
        writeln!(out, "|---|---|")?;
        writeln!(out, "| **Name** | {} |", cell(&student.full_name()))?;
        writeln!(out, "| **Student ID** | {} |", cell(&student.external_student_id))?;
        writeln!(out, "| **Program** | {} |", cell(&student.program))?;
        writeln!(out, "| **Year** | {} |", cell(&student.year))?;
        writeln!(out, "| **Semester** | {} |", cell(&student.semester))?;
        writeln!(out)?;
        Ok(())
    }

    fn write_grades(&self, out: &mut String, card: &ReportCard) -> Result<(), RenderError> {
        writeln!(out, "## Academic Performance")?;
        writeln!(out)?;
        writeln!(out, "| Course Code | Course Name | Credit Hours | Grade | Grade Points |")?;
        writeln!(out, "|---|---|:---:|:---:|:---:|")?;
        for course in card.grades() {
            writeln!(
                out,
                "| {} | {} | {} | {} | {:.1} |",
                cell(course.course_code()),
                cell(course.course_name()),
                course.credits(),
                emphasize(course),
                course.points()
            )?;
        }
        writeln!(
            out,
            "| **Total** | | **{}** | **GPA** | **{}** |",
            card.total_credits(),
            card.summary().display_gpa()
        )?;
        writeln!(out)?;
        Ok(())
    }

    fn write_scale(&self, out: &mut String) -> Result<(), RenderError> {
        writeln!(out, "## GPA Scale Reference")?;
        writeln!(out)?;
        writeln!(out, "| Grade | Points | Percentage |")?;
        writeln!(out, "|:---:|:---:|:---:|")?;
        for letter in GradeLetter::ALL {
            writeln!(
                out,
                "| {} | {:.1} | {} |",
                letter,
                letter.points(),
                letter.percentage()
            )?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_closing(&self, out: &mut String, card: &ReportCard) -> Result<(), RenderError> {
        writeln!(out, "## Remarks")?;
        writeln!(out)?;
        writeln!(out, "{}", card.remarks())?;
        writeln!(out)?;
        writeln!(out, "**Issue Date:** {}", card.issue_date_display())?;
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;
        if !card.signature().trim().is_empty() {
            writeln!(out, "**{}**  ", card.signature())?;
        }
        writeln!(out, "{}", self.letterhead.signatory_title)?;
        Ok(())
    }
}

impl ReportRenderer for MarkdownReportRenderer {
    fn render(&self, card: &ReportCard) -> Result<String, RenderError> {
        let mut out = String::new();
        self.write_header(&mut out)?;
        self.write_student(&mut out, card)?;
        self.write_grades(&mut out, card)?;
        self.write_scale(&mut out)?;
        self.write_closing(&mut out, card)?;
        Ok(out)
    }
}

/// Escapes pipes so free text cannot break a table row.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Bold for A-band grades, italic for D and F, plain otherwise.
fn emphasize(course: &GradedCourse) -> String {
    let grade = cell(course.grade());
    match GradeScale::recognize(course.grade()).map(|l| l.band()) {
        Some(GradeBand::A) => format!("**{}**", grade),
        Some(GradeBand::D) | Some(GradeBand::F) => format!("*{}*", grade),
        _ => grade,
    }
}
