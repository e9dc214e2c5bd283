use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use anyhow::Result;
use ws22_explore::{Dataset, Element, Field, Geometry, ModelError, Molecule, StatsTable};

use crate::util::truncate;

const INDENT: &str = "   ";

const BOX_INNER_WIDTH: usize = 72;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const HISTOGRAM_BINS: usize = 12;
const MAX_DISTRIBUTION_ROWS: usize = 15;

pub fn print_dataset_summary(dataset: &Dataset, molecule: Molecule, origin: &str) -> Result<()> {
    let families = family_counts(dataset)?.len();

    let mut rows = vec![
        ("Molecule", molecule.name().to_string()),
        ("Archive", molecule.archive_name()),
        ("Source", origin.to_string()),
        ("Conformations", format!("{}", dataset.conformation_count())),
        ("Atoms", format!("{}", dataset.atom_count())),
        ("Families", format!("{}", families)),
    ];

    if dataset.fields().contains(&Field::Freq) {
        rows.push(("Normal modes", format!("{}", dataset.mode_count()?)));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_kv_table(&mut out, "Dataset Summary", ("Metric", "Value"), &rows);
    Ok(())
}

pub fn print_field_shapes(dataset: &Dataset) -> Result<()> {
    let mut rows = Vec::new();
    for field in dataset.fields() {
        let dims: Vec<String> = dataset
            .array(field)?
            .shape()
            .iter()
            .map(|d| d.to_string())
            .collect();
        rows.push((field.key(), dims.join(" × ")));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_kv_table(&mut out, "Archive Fields", ("Field", "Shape"), &rows);
    Ok(())
}

pub fn print_element_distribution(dataset: &Dataset) -> Result<()> {
    let labels = dataset.atom_labels()?;

    let mut counts: HashMap<Element, usize> = HashMap::new();
    for element in &labels {
        *counts.entry(*element).or_insert(0) += 1;
    }

    let total = labels.len();
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(e, c)| (e.symbol().to_string(), c))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_distribution_table(&mut out, "Element Distribution", "Element", 8, &sorted, total);
    Ok(())
}

pub fn print_family_distribution(dataset: &Dataset) -> Result<()> {
    let counts = family_counts(dataset)?;
    let total = dataset.conformation_count();

    let data: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(id, count)| (id.to_string(), count))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_distribution_table(&mut out, "Conformation Families", "Family", 8, &data, total);
    Ok(())
}

/// Draws a fixed-bin histogram of a value column as a distribution table.
/// Non-finite values are left out of both the bins and the percentages.
pub fn print_histogram(column: &str, values: &[f64]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        let _ = writeln!(out, "{}(no rows to plot for {})", INDENT, column);
        return;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in &finite {
        min = min.min(*v);
        max = max.max(*v);
    }
    let span = max - min;

    let mut bins = vec![0usize; HISTOGRAM_BINS];
    for v in &finite {
        let idx = if span == 0.0 {
            0
        } else {
            ((((v - min) / span) * HISTOGRAM_BINS as f64) as usize).min(HISTOGRAM_BINS - 1)
        };
        bins[idx] += 1;
    }

    let bin_width = span / HISTOGRAM_BINS as f64;
    let data: Vec<(String, usize)> = bins
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let lo = min + bin_width * i as f64;
            let hi = min + bin_width * (i + 1) as f64;
            (format!("{:.3}..{:.3}", lo, hi), *count)
        })
        .collect();

    let title = format!("{} Histogram", column);
    print_distribution_table(&mut out, &title, "Range", 18, &data, finite.len());
}

pub fn print_family_stats(column: &str, stats: &StatsTable) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let family_w = 6usize;
    let count_w = 5usize;
    let mean_w = 10usize;
    let spread_w = 10usize;
    let min_w = 9usize;
    let max_w = 9usize;
    let widths = [family_w, count_w, mean_w, spread_w, min_w, max_w];

    let title = format!("Family Statistics ({})", column);
    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(&title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}┌{}┐", INDENT, rule(&widths, "┬"));
    let _ = writeln!(
        out,
        "{}│ {:<family_w$} │ {:>count_w$} │ {:>mean_w$} │ {:>spread_w$} │ {:>min_w$} │ {:>max_w$} │",
        INDENT,
        "Family",
        "Count",
        "Mean",
        "Std",
        "Min",
        "Max",
        family_w = family_w,
        count_w = count_w,
        mean_w = mean_w,
        spread_w = spread_w,
        min_w = min_w,
        max_w = max_w
    );
    let _ = writeln!(out, "{}├{}┤", INDENT, rule(&widths, "┼"));

    for row in &stats.rows {
        let _ = writeln!(
            out,
            "{}│ {:<family_w$} │ {:>count_w$} │ {:>mean_w$} │ {:>spread_w$} │ {:>min_w$} │ {:>max_w$} │",
            INDENT,
            row.conformation,
            row.count,
            number_cell(row.mean, mean_w),
            number_cell(row.std, spread_w),
            number_cell(row.min, min_w),
            number_cell(row.max, max_w),
            family_w = family_w,
            count_w = count_w,
            mean_w = mean_w,
            spread_w = spread_w,
            min_w = min_w,
            max_w = max_w
        );
    }

    let _ = writeln!(out, "{}└{}┘", INDENT, rule(&widths, "┴"));
}

pub fn print_structure_summary(geometry: &Geometry, number: usize, total: usize) {
    let mut formula_counts: BTreeMap<Element, usize> = BTreeMap::new();
    for element in &geometry.elements {
        *formula_counts.entry(*element).or_insert(0) += 1;
    }
    let formula: Vec<String> = formula_counts
        .into_iter()
        .map(|(e, c)| {
            if c > 1 {
                format!("{}{}", e.symbol(), c)
            } else {
                e.symbol().to_string()
            }
        })
        .collect();

    let rows = vec![
        ("Conformation", format!("{} of {}", number, total)),
        ("Atoms", format!("{}", geometry.atom_count())),
        ("Formula", formula.join(" ")),
    ];

    let stderr = io::stderr();
    let mut out = stderr.lock();
    print_kv_table(&mut out, "Structure Summary", ("Metric", "Value"), &rows);
}

fn family_counts(dataset: &Dataset) -> Result<BTreeMap<i64, usize>, ModelError> {
    let mut counts = BTreeMap::new();
    for id in dataset.conformations()? {
        *counts.entry(id).or_insert(0) += 1;
    }
    Ok(counts)
}

fn print_kv_table(
    out: &mut impl Write,
    title: &str,
    headers: (&str, &str),
    rows: &[(&str, String)],
) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT,
        headers.0,
        headers.1,
        key_w = key_w,
        val_w = val_w
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
            key_w = key_w,
            val_w = val_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    label_header: &str,
    name_w: usize,
    data: &[(String, usize)],
    total: usize,
) {
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{name_line}┬{count_line}┬{dist_line}┐",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT,
        label_header,
        "Count",
        "Distribution",
        name_w = name_w,
        count_w = count_w,
        dist_w = dist_w
    );
    let _ = writeln!(
        out,
        "{}├{name_line}┼{count_line}┼{dist_line}┤",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );

    for (name, count) in data.iter().take(MAX_DISTRIBUTION_ROWS) {
        let pct = (*count as f64 / total as f64) * 100.0;
        let bar = make_bar(pct, max_bar_width);
        let dist_cell = format!("{}  {:>5.1}%", bar, pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell,
            name_w = name_w,
            count_w = count_w,
            dist_w = dist_w
        );
    }

    if data.len() > MAX_DISTRIBUTION_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more)", data.len() - MAX_DISTRIBUTION_ROWS),
            name_w = name_w,
            count_w = count_w,
            dist_w = dist_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{name_line}┴{count_line}┴{dist_line}┘",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
}

fn rule(widths: &[usize], joint: &str) -> String {
    widths
        .iter()
        .map(|w| "─".repeat(w + 2))
        .collect::<Vec<_>>()
        .join(joint)
}

fn number_cell(value: f64, width: usize) -> String {
    truncate(&format!("{:.4}", value), width)
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
