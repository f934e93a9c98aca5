//! Console table of raw candidates for operator inspection.

use std::io::{self, Write};

use crate::api::MatchCandidate;

const HEADERS: [&str; 7] = [
    "substring",
    "score",
    "matching_type",
    "chosen",
    "ror",
    "organization",
    "country",
];

/// Render every candidate (before any filtering) as an aligned text table.
pub fn render_candidates(candidates: &[MatchCandidate]) -> String {
    let rows: Vec<[String; 7]> = candidates
        .iter()
        .map(|c| {
            [
                c.substring.clone(),
                format!("{:?}", c.score),
                c.matching_type.to_string(),
                if c.chosen { "True" } else { "False" }.to_string(),
                c.organization.id.clone(),
                c.organization.name.clone(),
                c.organization.country_name().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().map(|h| h.to_string()), &widths);
    for row in rows {
        push_line(&mut out, row.into_iter(), &widths);
    }
    out
}

/// Write the candidate table to `out`.
pub fn write_candidates<W: Write>(out: &mut W, candidates: &[MatchCandidate]) -> io::Result<()> {
    out.write_all(render_candidates(candidates).as_bytes())?;
    out.flush()
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            // score is numeric, right-aligned
            if i == 1 {
                format!("{:>width$}", cell)
            } else {
                format!("{:<width$}", cell)
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MatchingType, Organization};

    #[test]
    fn test_render_candidates() {
        let candidates = vec![
            MatchCandidate::new(
                "University of Oslo",
                1.0,
                MatchingType::Phrase,
                true,
                Organization::new("https://ror.org/01xtthb56", "University of Oslo", "Norway"),
            ),
            MatchCandidate::new(
                "UiO",
                0.5,
                MatchingType::Acronym,
                false,
                Organization::new("https://ror.org/000000000", "Other", "Sweden"),
            ),
        ];

        let table = render_candidates(&candidates);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("substring"));
        assert!(lines[0].ends_with("country"));
        assert!(lines[1].contains("PHRASE"));
        assert!(lines[1].contains("True"));
        assert!(lines[1].ends_with("Norway"));
        assert!(lines[2].contains("ACRONYM"));
        assert!(lines[2].contains("0.5"));
        // columns line up
        assert_eq!(lines[1].find("https://"), lines[2].find("https://"));
    }

    #[test]
    fn test_render_no_candidates_is_header_only() {
        assert_eq!(render_candidates(&[]).lines().count(), 1);
    }
}
