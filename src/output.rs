//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! ```text
//! $ xenfiny ratios
//! Aspect ratios for 512x512 (height x width)
//! 001 1:1    512 x 512
//! 002 2:3    512 x 341
//! ...
//! ```

use crate::sizing::{AspectRatio, fit_to_ratio};
use crate::types::{Dimensions, GenerationRequest};
use crate::upload::DropOutcome;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn format_dimensions(dims: Dimensions) -> String {
    format!("{} x {}", dims.height, dims.width)
}

/// Single-line result of a resize.
pub fn format_resize(from: Dimensions, ratio: AspectRatio, to: Dimensions) -> Vec<String> {
    vec![format!(
        "{} → {} ({})",
        format_dimensions(from),
        format_dimensions(to),
        ratio
    )]
}

/// Every ratio applied to the same starting canvas.
pub fn format_ratio_table(base: Dimensions, ratios: &[AspectRatio]) -> Vec<String> {
    let mut lines = vec![format!(
        "Aspect ratios for {}x{} (height x width)",
        base.height, base.width
    )];
    for (i, ratio) in ratios.iter().enumerate() {
        let fitted = fit_to_ratio(base, *ratio);
        lines.push(format!(
            "{} {:<6} {}",
            format_index(i + 1),
            ratio.to_string(),
            format_dimensions(fitted)
        ));
    }
    lines
}

/// Human-readable view of a generation request.
pub fn format_request(request: &GenerationRequest) -> Vec<String> {
    let mut lines = vec![
        "Generation request".to_string(),
        format!("    Prompt: {}", request.prompt),
    ];
    if let Some(negative) = &request.negative_prompt {
        lines.push(format!("    Negative prompt: {negative}"));
    }
    let ratio = request
        .aspect_ratio
        .map(|r| format!(" ({r})"))
        .unwrap_or_default();
    lines.push(format!(
        "    Size: {}{ratio}",
        format_dimensions(Dimensions::new(request.height, request.width))
    ));
    lines.push(format!("    CFG scale: {}", request.cfg_scale));
    lines.push(format!("    Steps: {}", request.steps));
    lines.push(format!("    Images: {}", request.image_count));
    lines.push(format!(
        "    Sampler: {}",
        request
            .sampler
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(none)".to_string())
    ));
    lines.push(format!("    Seed: {}", request.seed));
    lines.push(format!(
        "    Visibility: {}",
        if request.public { "public" } else { "private" }
    ));
    lines
}

/// Accepted files first, then rejected files with their reasons.
pub fn format_drop(outcome: &DropOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    if !outcome.accepted.is_empty() {
        lines.push("Accepted".to_string());
        for (i, file) in outcome.accepted.iter().enumerate() {
            lines.push(format!(
                "{} {} ({}, {} bytes)",
                format_index(i + 1),
                file.path.display(),
                file.mime,
                file.size
            ));
        }
    }
    if !outcome.rejected.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Rejected".to_string());
        for (i, file) in outcome.rejected.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), file.path.display()));
            lines.push(format!("    Reason: {}", file.reason));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{} accepted, {} rejected",
        outcome.accepted.len(),
        outcome.rejected.len()
    ));
    lines
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_resize(from: Dimensions, ratio: AspectRatio, to: Dimensions) {
    print_lines(format_resize(from, ratio, to));
}

pub fn print_ratio_table(base: Dimensions, ratios: &[AspectRatio]) {
    print_lines(format_ratio_table(base, ratios));
}

pub fn print_request(request: &GenerationRequest) {
    print_lines(format_request(request));
}

pub fn print_drop(outcome: &DropOutcome) {
    print_lines(format_drop(outcome));
}
