use colored::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use coursekit::commands::{CmdMessage, MessageLevel, Outline, OutlineModule};
use coursekit::error::CourseError;
use coursekit::forms::format_file_size;
use coursekit::model::{Resource, ResourceKind};

const LINE_WIDTH: usize = 100;
const TITLE_WIDTH: usize = 36;
const INDENT: &str = "    ";
const NO_NESTED_MATCHES: &str = "No resources match your search in this module.";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Input the user can fix is a warning; anything else is an error.
pub fn print_error(error: &CourseError) {
    match error {
        CourseError::Validation(fields) => {
            for field in fields.fields() {
                let message = fields.get(field).unwrap_or_default();
                eprintln!("{} {}", format!("{}:", field).yellow(), message.yellow());
            }
        }
        e if e.is_user_facing() => eprintln!("{}", e.to_string().yellow()),
        e => eprintln!("{} {}", "Error:".red(), e),
    }
}

pub fn print_outline(outline: &Outline) {
    for module in &outline.modules {
        let position = format!("{}.", module.position);
        let count = if outline.query.is_some() && module.resources.len() != module.total {
            format!("{}/{}", module.resources.len(), module.total)
        } else {
            module.total.to_string()
        };
        println!(
            "{} {} {}",
            position.yellow(),
            module.name.bold(),
            format!("({})", count).dimmed()
        );
        if let Some(note) = empty_module_note(outline, module) {
            println!("{}{}", INDENT, note.dimmed());
        }
        for resource in &module.resources {
            print_resource(resource);
        }
    }

    if !outline.resources.is_empty() {
        if !outline.modules.is_empty() {
            println!();
        }
        println!("{}", "Unassigned".bold());
        for resource in &outline.resources {
            print_resource(resource);
        }
    }
}

/// Placeholder line for a module with nothing to show.
fn empty_module_note(outline: &Outline, module: &OutlineModule) -> Option<&'static str> {
    if !module.resources.is_empty() {
        return None;
    }
    Some(match outline.query {
        Some(_) => NO_NESTED_MATCHES,
        None => "empty",
    })
}

fn print_resource(resource: &Resource) {
    let title = truncate_to_width(&resource.title, TITLE_WIDTH);
    let padding = TITLE_WIDTH.saturating_sub(title.width()) + 2;

    let (marker, detail) = match &resource.kind {
        ResourceKind::Link { url } => ("↗", url.clone()),
        ResourceKind::File(file) => (
            "▤",
            format!("{} · {}", file.file_name, format_file_size(file.file_size)),
        ),
    };
    let fixed = INDENT.width() + 2 + TITLE_WIDTH + 2;
    let detail = truncate_to_width(&detail, LINE_WIDTH.saturating_sub(fixed));

    println!(
        "{}{} {}{}{}",
        INDENT,
        marker.cyan(),
        title,
        " ".repeat(padding),
        detail.dimmed()
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
