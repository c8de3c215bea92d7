//! Terminal rendering of the report view model.
//!
//! Every function returns a string so rendering stays testable; the app
//! layer decides when to print. Styling is deliberately spare: bold for
//! titles, dim for captions, the accent hex shown as-is.

use console::style;
use mindcolor_core::{IndicatorCard, ReadingBlock, Report, ReportHeader};

const RULE: &str = "────────────────────────────────────────────────────────";

/// Introduction screen shown before the journey starts.
pub fn intro_banner() -> String {
    format!(
        "\n{}\n\n{}\n",
        style("M I N D   C O L O R   M A P").bold(),
        "A warm welcome. Together we will explore the map of your mind\n\
         through numerology and energy frequency, turning every pressure\n\
         into strength, and your vibration toward understanding and love."
    )
}

/// Progress line shown while the oracle call is in flight.
pub fn consulting_line() -> String {
    style("Consulting the frequencies...").dim().to_string()
}

/// Header block: who, the headline, the main color.
pub fn header_block(header: &ReportHeader) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{}\n",
        style(format!("THE VIBRATION OF {}", header.full_name.to_uppercase())).bold()
    ));
    out.push_str(&format!("\n{}\n", header.introduction));
    out.push_str(&format!("\n{}\n", style(&header.main_color_description).italic()));
    out.push_str(&format!(
        "\n{}  {}\n",
        style("Main tone").dim(),
        style(&header.main_color_hex).bold()
    ));
    out.push_str(&format!(
        "{}  {}\n",
        style("Birth date").dim(),
        header.birth_date.format("%Y-%m-%d")
    ));
    if let Some(intention) = &header.intention {
        out.push_str(&format!("{}  {}\n", style("Intention").dim(), intention));
    }
    out
}

/// One indicator as a self-contained card.
pub fn indicator_card(card: &IndicatorCard) -> String {
    let number = card
        .number
        .map(|n| format!(" {n:>2} "))
        .unwrap_or_else(|| "    ".to_string());
    let accent = card
        .color_hex
        .as_deref()
        .map(|hex| format!("  {}", style(hex).dim()))
        .unwrap_or_default();

    format!(
        "{}{}  {}{}\n",
        style(number).bold(),
        style(&card.title).bold(),
        card.value,
        accent
    )
}

/// One block of the long-form reading.
pub fn reading_block(block: &ReadingBlock) -> String {
    match block {
        ReadingBlock::SectionTitle(title) => format!("\n{}\n", style(title).bold().underlined()),
        ReadingBlock::Body(body) => format!("\n{body}\n"),
    }
}

/// The full report, top to bottom.
pub fn report_to_string(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&header_block(&report.header));

    out.push_str(&format!(
        "\n{RULE}\n{}\n{RULE}\n\n",
        style(format!(
            "THE {} ENERGY FREQUENCIES",
            report.indicators.len()
        ))
        .bold()
    ));
    for card in &report.indicators {
        out.push_str(&indicator_card(card));
    }

    out.push_str(&format!("\n{RULE}\n"));
    for block in &report.reading {
        out.push_str(&reading_block(block));
    }

    out.push_str(&format!(
        "\n{RULE}\n\n{}\n",
        style(&report.blessing).italic()
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mindcolor_core::{render, AnalysisResult, Indicator, UserInput};

    fn sample_report() -> Report {
        let input = UserInput {
            full_name: "Nguyen Van A".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            intention: Some("find balance".into()),
        };
        let result = AnalysisResult {
            introduction: "A chart of quiet resolve.".into(),
            main_color_description: "Deep emerald.".into(),
            main_color_hex: "#1A6B4C".into(),
            indicators: vec![
                Indicator {
                    title: "Life Path".into(),
                    value: "7".into(),
                    color_hex: Some("#112233".into()),
                    number: Some(7),
                },
                Indicator {
                    title: "Soul Urge".into(),
                    value: "11".into(),
                    color_hex: None,
                    number: None,
                },
            ],
            full_reading: "## Opening\n\nThe numbers align.".into(),
            blessing: "Walk gently.".into(),
        };
        render(&input, &result)
    }

    fn plain(text: &str) -> String {
        console::strip_ansi_codes(text).to_string()
    }

    #[test]
    fn header_names_the_person_and_the_tone() {
        let text = plain(&header_block(&sample_report().header));
        assert!(text.contains("THE VIBRATION OF NGUYEN VAN A"));
        assert!(text.contains("#1A6B4C"));
        assert!(text.contains("1990-05-01"));
        assert!(text.contains("Intention  find balance"));
    }

    #[test]
    fn header_omits_absent_intention() {
        let mut report = sample_report();
        report.header.intention = None;
        let text = plain(&header_block(&report.header));
        assert!(!text.contains("Intention"));
    }

    #[test]
    fn cards_render_in_order() {
        let report = sample_report();
        let text = plain(&report_to_string(&report));
        let life = text.find("Life Path").unwrap();
        let soul = text.find("Soul Urge").unwrap();
        assert!(life < soul);
    }

    #[test]
    fn card_shows_optional_fields_when_present() {
        let report = sample_report();
        let with_extras = plain(&indicator_card(&report.indicators[0]));
        assert!(with_extras.contains(" 7 "));
        assert!(with_extras.contains("#112233"));

        let without = plain(&indicator_card(&report.indicators[1]));
        assert!(without.contains("Soul Urge"));
        assert!(!without.contains('#'));
    }

    #[test]
    fn reading_blocks_keep_order_and_case() {
        let report = sample_report();
        let text = plain(&report_to_string(&report));
        let heading = text.find("OPENING").unwrap();
        let body = text.find("The numbers align.").unwrap();
        assert!(heading < body);
    }

    #[test]
    fn blessing_closes_the_report() {
        let text = plain(&report_to_string(&sample_report()));
        let blessing = text.find("Walk gently.").unwrap();
        assert!(blessing > text.find("OPENING").unwrap());
    }

    #[test]
    fn frequency_count_follows_the_result() {
        let text = plain(&report_to_string(&sample_report()));
        assert!(text.contains("THE 2 ENERGY FREQUENCIES"));
    }
}
