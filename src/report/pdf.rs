use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point, Polygon, Rgb,
};

use crate::models::{Assessment, PolicyVerdict, SafetyLevel};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const COVER_HDR_H: f32 = 72.0; // gradient header height on cover page

// ── Colour palette ────────────────────────────────────────────────────────────
const BG:           (f32, f32, f32) = (1.00, 1.00, 1.00); // pure white page
const PANEL:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL_ALT:    (f32, f32, f32) = (0.95, 0.98, 0.96); // subtle alternating tint
const PANEL_BORDER: (f32, f32, f32) = (0.85, 0.90, 0.87); // subtle border
const ACCENT_GRN:   (f32, f32, f32) = (0.10, 0.60, 0.38); // vivid green
const ACCENT_TEAL:  (f32, f32, f32) = (0.03, 0.43, 0.47); // deep teal
const TEXT_PRI:     (f32, f32, f32) = (0.07, 0.12, 0.10); // near-black
const TEXT_SEC:     (f32, f32, f32) = (0.36, 0.44, 0.40); // medium grey-green
const TEXT_MUT:     (f32, f32, f32) = (0.58, 0.66, 0.61); // muted grey
const WHITE:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const WHITE_DIM:    (f32, f32, f32) = (0.84, 0.95, 0.89); // dimmed white for header

const LOW_BG:  (f32, f32, f32) = (0.90, 0.98, 0.92);
const LOW_FG:  (f32, f32, f32) = (0.07, 0.52, 0.22);
const MOD_BG:  (f32, f32, f32) = (1.00, 0.95, 0.87);
const MOD_FG:  (f32, f32, f32) = (0.70, 0.40, 0.02);
const HIGH_BG: (f32, f32, f32) = (1.00, 0.91, 0.91);
const HIGH_FG: (f32, f32, f32) = (0.76, 0.09, 0.13);

// Corner radius constants
const R_PANEL: f32 = 2.5;
const R_BADGE: f32 = 1.5;

// ── Safety summary table layout ───────────────────────────────────────────────
const C1_X: f32 = MARGIN;
const C2_X: f32 = MARGIN + 44.0;
const C3_X: f32 = MARGIN + 118.0;
const T_END: f32 = PAGE_W - MARGIN;

const HDR_H: f32 = 9.0;
const LINE_H: f32 = 4.8;
const ROW_PAD: f32 = 4.5;

const BADGE_W: f32 = 37.0;
const BADGE_H: f32 = 6.5;
const DOT_SIZE: f32 = 2.5;

const DESC_WRAP: usize = 36;
const NAMES_WRAP: usize = 28;
const NAMES_MAX_LINES: usize = 4;

fn level_colors(level: SafetyLevel) -> ((f32, f32, f32), (f32, f32, f32)) {
    match level {
        SafetyLevel::Low => (LOW_BG, LOW_FG),
        SafetyLevel::Moderate => (MOD_BG, MOD_FG),
        SafetyLevel::High => (HIGH_BG, HIGH_FG),
    }
}

fn verdict_colors(verdict: &PolicyVerdict) -> (&'static str, (f32, f32, f32), (f32, f32, f32)) {
    match verdict {
        PolicyVerdict::Pass => ("PASS", LOW_FG, LOW_BG),
        PolicyVerdict::Warn => ("WARN", MOD_FG, MOD_BG),
        PolicyVerdict::Error => ("ERROR", HIGH_FG, HIGH_BG),
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render a PDF report: cover page → safety summary table → full ingredient table.
pub fn render(assessments: &[Assessment], source: &str, output_path: &Path) -> Result<()> {
    let doc = PdfDocument::empty("Ingredient Safety Report");

    add_cover_page(&doc, assessments, source)?;
    add_safety_summary_page(&doc, assessments)?;
    add_table_pages(&doc, assessments)?;

    let bytes = doc.save_to_bytes()?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    println!("PDF report written to: {}", output_path.display());
    Ok(())
}

// ── Cover page ────────────────────────────────────────────────────────────────

fn add_cover_page(
    doc: &PdfDocumentReference,
    assessments: &[Assessment],
    source: &str,
) -> Result<()> {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Cover");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let low = count_level(assessments, SafetyLevel::Low);
    let moderate = count_level(assessments, SafetyLevel::Moderate);
    let high = count_level(assessments, SafetyLevel::High);

    // Background + gradient header
    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    let hdr_bot = PAGE_H - COVER_HDR_H;
    fill_gradient_h(&layer, 0.0, hdr_bot, PAGE_W, COVER_HDR_H, ACCENT_GRN, ACCENT_TEAL, 28);

    set_color(&layer, WHITE_DIM);
    layer.use_text(
        format!("ingredient-checkr v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(PAGE_W - MARGIN - 44.0), Mm(PAGE_H - 10.5), &font_r,
    );

    set_color(&layer, WHITE);
    layer.use_text("Ingredient Safety", 28.0, Mm(MARGIN), Mm(PAGE_H - 26.0), &font_b);
    set_color(&layer, WHITE_DIM);
    layer.use_text("Report", 28.0, Mm(MARGIN), Mm(PAGE_H - 41.0), &font_b);

    // Source chip
    let chip_y = hdr_bot - 18.0;
    let chip_h = 12.0f32;
    let chip_w = 106.0f32;
    fill_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL);
    stroke_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL_BORDER);
    fill_rect(&layer, MARGIN, chip_y, 2.5, chip_h, ACCENT_GRN);

    set_color(&layer, TEXT_MUT);
    layer.use_text("SOURCE", 6.0, Mm(MARGIN + 5.0), Mm(chip_y + chip_h - 3.8), &font_b);
    set_color(&layer, TEXT_PRI);
    layer.use_text(truncate(source, 34), 9.5, Mm(MARGIN + 5.0), Mm(chip_y + 2.8), &font_b);

    // Analysis date
    set_color(&layer, TEXT_SEC);
    layer.use_text(
        format!("Analyzed  {}", date_stamp()),
        9.0, Mm(MARGIN), Mm(chip_y - 8.0), &font_r,
    );

    // Divider + OVERVIEW
    let rule_y = chip_y - 16.5;
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, rule_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("OVERVIEW", 6.5, Mm(MARGIN), Mm(rule_y - 7.0), &font_b);

    // Stat cards
    let card_y = rule_y - 42.0;
    let card_h = 26.0f32;
    let gap = 4.0f32;
    let total_w = T_END - MARGIN;
    let card_w = (total_w - gap * 3.0) / 4.0;

    let cards: [(&str, String, (f32, f32, f32)); 4] = [
        ("TOTAL",    assessments.len().to_string(), ACCENT_GRN),
        ("LOW",      low.to_string(),               LOW_FG),
        ("MODERATE", moderate.to_string(),          MOD_FG),
        ("HIGH",     high.to_string(),              HIGH_FG),
    ];

    for (i, (label, value, accent)) in cards.iter().enumerate() {
        let cx = MARGIN + (card_w + gap) * i as f32;
        draw_stat_card(&layer, cx, card_y, card_w, card_h, label, value, *accent,
                       &font_r, &font_b);
    }

    // EWG score distribution histogram
    let section_y = card_y - 13.0;
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, section_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("EWG SCORE DISTRIBUTION", 6.5, Mm(MARGIN), Mm(section_y - 7.5), &font_b);

    let hist_base = section_y - 40.0;
    draw_score_histogram(&layer, assessments, MARGIN, hist_base, T_END - MARGIN, 24.0, &font_r);

    // What's in this report
    let bullets_y = hist_base - 12.0;
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, bullets_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("WHAT'S IN THIS REPORT", 6.5, Mm(MARGIN), Mm(bullets_y - 7.5), &font_b);

    let items = [
        ("Safety Summary",  "Ingredients grouped by safety concern level"),
        ("All Ingredients", "Full analysis with function, EWG score, and policy verdict"),
    ];
    for (j, (title, desc)) in items.iter().enumerate() {
        let iy = bullets_y - 15.0 - j as f32 * 10.0;
        fill_rounded_rect(&layer, MARGIN, iy + 2.0, 2.0, 2.0, 1.0, ACCENT_GRN);
        set_color(&layer, TEXT_PRI);
        layer.use_text(*title, 8.5, Mm(MARGIN + 5.0), Mm(iy + 2.0), &font_b);
        set_color(&layer, TEXT_SEC);
        layer.use_text(*desc, 8.0, Mm(MARGIN + 5.0), Mm(iy - 3.5), &font_r);
    }

    // Footer
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 22.0, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text(
        format!("Generated by ingredient-checkr v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), &font_r,
    );
    layer.use_text(date_stamp(), 7.5, Mm(PAGE_W - MARGIN - 22.0), Mm(15.0), &font_r);

    Ok(())
}

fn count_level(assessments: &[Assessment], level: SafetyLevel) -> usize {
    assessments
        .iter()
        .filter(|a| a.ingredient.safety_level == level)
        .count()
}

/// Bar chart of ingredient counts per EWG score (1–10), colored from the
/// low-concern green to the high-concern red.
fn draw_score_histogram(
    layer: &PdfLayerReference,
    assessments: &[Assessment],
    x: f32,
    y: f32,
    w: f32,
    max_h: f32,
    font_r: &IndirectFontRef,
) {
    let mut counts = [0usize; 10];
    for a in assessments {
        let score = a.ingredient.ewg_score.clamp(1, 10) as usize;
        counts[score - 1] += 1;
    }
    let peak = counts.iter().copied().max().unwrap_or(0).max(1);

    let gap = 2.0f32;
    let bar_w = (w - gap * 9.0) / 10.0;

    for (i, &n) in counts.iter().enumerate() {
        let bx = x + (bar_w + gap) * i as f32;
        let t = i as f32 / 9.0;
        let color = lerp_color(LOW_FG, HIGH_FG, t);

        // Baseline tick for empty slots, scaled bar otherwise
        let bar_h = if n == 0 {
            0.6
        } else {
            2.0 + (max_h - 2.0) * n as f32 / peak as f32
        };
        fill_rounded_rect(layer, bx, y, bar_w, bar_h, 0.8, color);

        if n > 0 {
            set_color(layer, TEXT_SEC);
            layer.use_text(
                n.to_string(),
                7.0, Mm(bx + bar_w / 2.0 - 1.0), Mm(y + bar_h + 1.5), font_r,
            );
        }

        set_color(layer, TEXT_MUT);
        layer.use_text(
            (i + 1).to_string(),
            6.5, Mm(bx + bar_w / 2.0 - 1.0), Mm(y - 4.0), font_r,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_stat_card(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    label: &str,
    value: &str,
    accent: (f32, f32, f32),
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    fill_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL);
    stroke_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL_BORDER);

    // Thin accent top strip
    fill_rect(layer, x, y + h - 2.0, w, 2.0, accent);

    set_color(layer, accent);
    layer.use_text(value, 20.0, Mm(x + 5.0), Mm(y + h * 0.38), font_b);

    set_color(layer, TEXT_MUT);
    layer.use_text(label, 6.5, Mm(x + 5.0), Mm(y + 3.5), font_r);
}

// ── Safety summary page ───────────────────────────────────────────────────────

struct RowDef {
    name: &'static str,
    level: SafetyLevel,
    description: &'static str,
}

struct RenderedRow {
    name: &'static str,
    bg: (f32, f32, f32),
    fg: (f32, f32, f32),
    desc_lines: Vec<String>,
    name_lines: Vec<String>,
    height: f32,
}

fn add_safety_summary_page(doc: &PdfDocumentReference, assessments: &[Assessment]) -> Result<()> {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Safety Summary");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    fill_gradient_h(&layer, 0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_GRN, ACCENT_TEAL, 21);

    let defs = [
        RowDef {
            name: "Low Concern",
            level: SafetyLevel::Low,
            description: "Generally considered safe at the concentrations found in consumer products.",
        },
        RowDef {
            name: "Moderate Concern",
            level: SafetyLevel::Moderate,
            description: "Some evidence of irritation or toxicity; unrecognized ingredients also land here.",
        },
        RowDef {
            name: "High Concern",
            level: SafetyLevel::High,
            description: "Linked to allergies, hormone disruption, or other significant health concerns.",
        },
    ];

    let rows: Vec<RenderedRow> = defs.iter().map(|d| {
        let names: Vec<String> = assessments.iter()
            .filter(|a| a.ingredient.safety_level == d.level)
            .map(|a| a.ingredient.name.clone())
            .collect();
        let desc_lines = wrap_text(d.description, DESC_WRAP);
        // All names listed first (capped to NAMES_MAX_LINES), count line at the bottom
        let name_lines = {
            let mut lines = format_name_count_list(&names, NAMES_WRAP);
            if lines.len() > NAMES_MAX_LINES {
                let count_line = lines.last().cloned().unwrap_or_default();
                lines.truncate(NAMES_MAX_LINES - 1);
                lines.push(count_line);
            }
            lines
        };
        let (bg, fg) = level_colors(d.level);
        let n = desc_lines.len().max(name_lines.len()).max(2) as f32;
        RenderedRow {
            name: d.name, bg, fg, desc_lines, name_lines,
            height: n * LINE_H + ROW_PAD * 2.0,
        }
    }).collect();

    const TABLE_TOP: f32 = 258.0;
    let total_h = HDR_H + rows.iter().map(|r| r.height).sum::<f32>();
    let table_bot = TABLE_TOP - total_h;
    let table_w = T_END - C1_X;

    // Page header
    set_color(&layer, TEXT_PRI);
    layer.use_text("Safety Summary", 20.0, Mm(MARGIN), Mm(278.5), &font_b);
    set_color(&layer, TEXT_SEC);
    layer.use_text(
        "All ingredients grouped by safety concern level",
        9.0, Mm(MARGIN), Mm(271.5), &font_r,
    );
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 267.5, PANEL_BORDER);

    // Table panel background (white, rounded)
    fill_rounded_rect(&layer, C1_X, table_bot, table_w, total_h, R_PANEL, PANEL);
    stroke_rounded_rect(&layer, C1_X, table_bot, table_w, total_h, R_PANEL, PANEL_BORDER);

    // Header row labels + bottom separator
    set_color(&layer, TEXT_SEC);
    layer.use_text("SAFETY LEVEL",  7.0, Mm(C1_X + 4.0), Mm(TABLE_TOP - 6.2), &font_b);
    layer.use_text("WHAT IT MEANS", 7.0, Mm(C2_X + 2.0), Mm(TABLE_TOP - 6.2), &font_b);
    layer.use_text("INGREDIENTS",   7.0, Mm(C3_X + 2.0), Mm(TABLE_TOP - 6.2), &font_b);
    draw_hline(&layer, C1_X + R_PANEL, T_END - R_PANEL, TABLE_TOP - HDR_H, PANEL_BORDER);

    // Data rows
    let mut y_top = TABLE_TOP - HDR_H;

    for (i, row) in rows.iter().enumerate() {
        let y_bot = y_top - row.height;

        if i % 2 == 1 {
            fill_rect(&layer, C1_X, y_bot, table_w, row.height, PANEL_ALT);
        }

        // Level badge (rounded)
        let badge_x = C1_X + 3.0;
        let badge_y = y_top - ROW_PAD - BADGE_H;
        fill_rounded_rect(&layer, badge_x, badge_y, BADGE_W, BADGE_H, R_BADGE, row.bg);

        // Dot in badge
        fill_rounded_rect(&layer,
            badge_x + 2.5, badge_y + (BADGE_H - DOT_SIZE) / 2.0,
            DOT_SIZE, DOT_SIZE, DOT_SIZE / 2.0, row.fg);

        set_color(&layer, row.fg);
        layer.use_text(row.name, 8.0, Mm(badge_x + 7.5), Mm(badge_y + 1.5), &font_b);

        // Description
        set_color(&layer, TEXT_SEC);
        for (j, line) in row.desc_lines.iter().enumerate() {
            let ly = y_top - ROW_PAD - (j as f32 + 0.9) * LINE_H;
            layer.use_text(line.as_str(), 8.0, Mm(C2_X + 2.0), Mm(ly), &font_r);
        }

        // Ingredient names — all names listed first (muted), count line last (bold)
        let last_idx = row.name_lines.len().saturating_sub(1);
        for (j, line) in row.name_lines.iter().enumerate() {
            let ly = y_top - ROW_PAD - (j as f32 + 0.9) * LINE_H;
            if j == last_idx {
                set_color(&layer, TEXT_PRI);
                layer.use_text(line.as_str(), 9.0, Mm(C3_X + 2.0), Mm(ly), &font_b);
            } else {
                set_color(&layer, TEXT_MUT);
                layer.use_text(line.as_str(), 7.0, Mm(C3_X + 2.0), Mm(ly), &font_r);
            }
        }

        if i < rows.len() - 1 {
            draw_hline(&layer, C1_X + R_PANEL, T_END - R_PANEL, y_bot, PANEL_BORDER);
        }
        y_top = y_bot;
    }

    // Footer
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 22.0, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text(
        format!("ingredient-checkr v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), &font_r,
    );

    Ok(())
}

// ── Full ingredient table pages ───────────────────────────────────────────────

fn add_table_pages(doc: &PdfDocumentReference, assessments: &[Assessment]) -> Result<()> {
    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    const BASE_ROW_H: f32 = 7.0;
    const EXTRA_LINE_H: f32 = 3.5;
    const HDR_Y: f32 = 268.5;
    const FIRST_Y: f32 = 259.5;
    const BOT_MARGIN: f32 = 25.0;
    const REASON_WRAP: usize = 90;

    //  NAME       FUNCTION   EWG        SAFETY     VERDICT
    //  18…70      70…112     112…124    124…152    152…192  (mm)
    let col_x = [MARGIN, MARGIN + 52.0, MARGIN + 94.0, MARGIN + 106.0, MARGIN + 134.0];
    let headers = ["NAME", "FUNCTION", "EWG", "SAFETY", "VERDICT"];

    // Pre-compute wrapped reason lines and dynamic row heights
    let row_data: Vec<(Vec<String>, f32)> = assessments.iter().map(|a| {
        let lines = if a.ingredient.reason_for_concern.is_empty() {
            Vec::new()
        } else {
            wrap_text(&a.ingredient.reason_for_concern, REASON_WRAP)
        };
        let h = BASE_ROW_H + lines.len() as f32 * EXTRA_LINE_H;
        (lines, h)
    }).collect();

    let mut cur_y = FIRST_Y;
    let mut page_state: Option<(PdfPageIndex, PdfLayerIndex)> = None;
    let mut page_num: u32 = 0;

    for (row_idx, a) in assessments.iter().enumerate() {
        let (reason_lines, row_h) = &row_data[row_idx];
        let row_h = *row_h;

        let needs_new_page = page_state.is_none() || cur_y - row_h < BOT_MARGIN;

        if needs_new_page {
            page_num += 1;
            let (pi, li) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Ingredients");
            let layer = doc.get_page(pi).get_layer(li);

            fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
            fill_gradient_h(&layer, 0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_GRN, ACCENT_TEAL, 21);

            set_color(&layer, TEXT_PRI);
            layer.use_text("All Ingredients", 14.0, Mm(MARGIN), Mm(282.5), &font_b);
            set_color(&layer, TEXT_MUT);
            layer.use_text(
                format!("Page {}", page_num),
                8.0, Mm(PAGE_W - MARGIN - 14.0), Mm(283.0), &font_r,
            );
            draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 277.5, PANEL_BORDER);

            // Header row (white rounded panel)
            fill_rounded_rect(&layer, MARGIN, HDR_Y - 7.5, PAGE_W - 2.0 * MARGIN, 9.5, R_BADGE, PANEL);
            stroke_rounded_rect(&layer, MARGIN, HDR_Y - 7.5, PAGE_W - 2.0 * MARGIN, 9.5, R_BADGE, PANEL_BORDER);
            set_color(&layer, TEXT_MUT);
            for (i, h) in headers.iter().enumerate() {
                layer.use_text(*h, 7.0, Mm(col_x[i] + 1.5), Mm(HDR_Y - 4.0), &font_b);
            }

            // Footer
            draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 22.0, PANEL_BORDER);
            set_color(&layer, TEXT_MUT);
            layer.use_text(
                format!("ingredient-checkr v{}", env!("CARGO_PKG_VERSION")),
                7.5, Mm(MARGIN), Mm(15.0), &font_r,
            );

            cur_y = FIRST_Y;
            page_state = Some((pi, li));
        }

        let (pi, li) = page_state.unwrap();
        let layer = doc.get_page(pi).get_layer(li);

        let (verdict_str, verdict_fg, verdict_bg) = verdict_colors(&a.verdict);
        let (_, level_fg) = level_colors(a.ingredient.safety_level);

        // Alternating row background (even rows get a subtle tint)
        if row_idx % 2 == 0 {
            fill_rect(&layer, MARGIN, cur_y - row_h + 1.5, PAGE_W - 2.0 * MARGIN, row_h, PANEL_ALT);
        }

        let text_y = cur_y - 4.0;

        set_color(&layer, TEXT_PRI);
        layer.use_text(truncate(&a.ingredient.name, 30), 8.0, Mm(col_x[0] + 1.5), Mm(text_y), &font_r);
        set_color(&layer, TEXT_SEC);
        layer.use_text(truncate(&a.ingredient.function, 26), 8.0, Mm(col_x[1] + 1.5), Mm(text_y), &font_r);
        layer.use_text(a.ingredient.ewg_score.to_string(), 8.0, Mm(col_x[2] + 1.5), Mm(text_y), &font_r);

        set_color(&layer, level_fg);
        layer.use_text(a.ingredient.safety_level.to_string(), 8.0, Mm(col_x[3] + 1.5), Mm(text_y), &font_r);

        // Reason for concern — wrapped, muted, under the main line
        set_color(&layer, TEXT_MUT);
        for (j, line) in reason_lines.iter().enumerate() {
            let line_y = text_y - (j as f32 + 1.0) * EXTRA_LINE_H;
            layer.use_text(line.as_str(), 7.0, Mm(col_x[0] + 1.5), Mm(line_y), &font_r);
        }

        // Verdict badge
        let badge_x = col_x[4] + 1.5;
        let badge_y = cur_y - BASE_ROW_H + 2.2;
        fill_rounded_rect(&layer, badge_x, badge_y, 20.0, 4.8, R_BADGE, verdict_bg);
        set_color(&layer, verdict_fg);
        layer.use_text(verdict_str, 7.0, Mm(badge_x + 3.0), Mm(badge_y + 1.1), &font_b);

        // Row separator
        draw_hline(&layer, MARGIN, T_END, cur_y - row_h + 1.5, PANEL_BORDER);

        cur_y -= row_h;
    }

    Ok(())
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn set_color(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
}

fn lerp_color(from: (f32, f32, f32), to: (f32, f32, f32), t: f32) -> (f32, f32, f32) {
    (
        from.0 + (to.0 - from.0) * t,
        from.1 + (to.1 - from.1) * t,
        from.2 + (to.2 - from.2) * t,
    )
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
             (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x),     Mm(y)),     false),
            (Point::new(Mm(x + w), Mm(y)),     false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x),     Mm(y + h)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
}

/// Build a clockwise polygon ring approximating a rounded rectangle.
/// Uses 8 line segments per quarter-circle arc.
fn rounded_rect_ring(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(Point, bool)> {
    let r = r.min(w / 2.0).min(h / 2.0);
    const SEGS: usize = 8;
    let mut pts = Vec::with_capacity(4 * (SEGS + 1));

    // (corner_cx, corner_cy, arc_start_deg, arc_end_deg) — clockwise order
    let corners = [
        (x + w - r, y + r,     270.0f32, 360.0f32), // bottom-right
        (x + w - r, y + h - r, 0.0f32,   90.0f32),  // top-right
        (x + r,     y + h - r, 90.0f32,  180.0f32), // top-left
        (x + r,     y + r,     180.0f32, 270.0f32), // bottom-left
    ];

    for (cx, cy, start, end) in &corners {
        for i in 0..=SEGS {
            let t = i as f32 / SEGS as f32;
            let angle = (start + (end - start) * t).to_radians();
            pts.push((
                Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())),
                false,
            ));
        }
    }
    pts
}

fn fill_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                     r: f32, (cr, cg, cb): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r: cr, g: cg, b: cb, icc_profile: None }));
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
}

fn stroke_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                       r: f32, (cr, cg, cb): (f32, f32, f32)) {
    layer.set_outline_color(Color::Rgb(Rgb { r: cr, g: cg, b: cb, icc_profile: None }));
    layer.set_outline_thickness(0.4);
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

fn draw_hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32,
              (r, g, b): (f32, f32, f32)) {
    layer.set_outline_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.set_outline_thickness(0.3);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

/// Fill a left-to-right gradient rectangle using `steps` vertical strips.
#[allow(clippy::too_many_arguments)]
fn fill_gradient_h(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    from: (f32, f32, f32),
    to: (f32, f32, f32),
    steps: usize,
) {
    let step_w = w / steps as f32;
    for i in 0..steps {
        let t = i as f32 / (steps - 1).max(1) as f32;
        // Overlap strips slightly to prevent rounding gaps
        fill_rect(layer, x + i as f32 * step_w, y, step_w + 0.6, h, lerp_color(from, to, t));
    }
}

// ── Text helpers ──────────────────────────────────────────────────────────────

fn truncate(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max {
        format!("{}…", chars[..max - 1].iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.len() <= max_chars {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() > max_chars {
            lines.push(current.clone());
            current = word.to_string();
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// All names wrapped into lines first, then "<N> ingredient(s)" as the final line.
fn format_name_count_list(names: &[String], max_chars: usize) -> Vec<String> {
    if names.is_empty() {
        return vec!["—".to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for name in names {
        let sep = if current.is_empty() { "" } else { ", " };
        let candidate = format!("{}{}", sep, name);
        if !current.is_empty() && current.len() + candidate.len() > max_chars {
            lines.push(current.clone());
            current = name.clone();
        } else {
            current.push_str(&candidate);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    let count_line = format!(
        "{} ingredient{}",
        names.len(),
        if names.len() == 1 { "" } else { "s" }
    );
    lines.push(count_line);
    lines
}

// ── Date helper ───────────────────────────────────────────────────────────────

fn date_stamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let days  = secs / 86400;
    let year  = 1970 + days / 365;
    let doy   = days % 365;
    let month = (doy / 30) + 1;
    let day   = (doy % 30) + 1;
    format!("{:04}-{:02}-{:02}", year, month.min(12), day.min(31))
}
