//! Report view model.
//!
//! A pure projection of a finalized input and a validated analysis into
//! the composed report: header, ordered indicator cards, segmented
//! reading, closing blessing. Drawing the report is the boundary layer's
//! job; nothing here touches a terminal or performs I/O.

use chrono::NaiveDate;

use crate::segment::{segment, SegmentKind};
use crate::types::{AnalysisResult, UserInput};

/// Header block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub full_name: String,
    pub introduction: String,
    pub main_color_description: String,
    pub main_color_hex: String,
    pub birth_date: NaiveDate,
    /// Present only when the user stated an intention
    pub intention: Option<String>,
}

/// One indicator, ready for a card renderer.
///
/// Self-contained: cards share no state with their siblings and are
/// drawn in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorCard {
    pub title: String,
    pub value: String,
    pub color_hex: Option<String>,
    pub number: Option<u32>,
}

/// One element of the long-form reading, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingBlock {
    /// Section title, already uppercased for display
    SectionTitle(String),
    /// Body paragraph
    Body(String),
}

/// The composed report view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub header: ReportHeader,
    pub indicators: Vec<IndicatorCard>,
    pub reading: Vec<ReadingBlock>,
    pub blessing: String,
}

/// Compose the report from a finalized input and a validated result.
///
/// Assumes the result already passed `AnalysisResult::validate`;
/// malformed results are the flow controller's concern, not this one's.
pub fn render(input: &UserInput, result: &AnalysisResult) -> Report {
    let header = ReportHeader {
        full_name: input.full_name.clone(),
        introduction: result.introduction.clone(),
        main_color_description: result.main_color_description.clone(),
        main_color_hex: result.main_color_hex.clone(),
        birth_date: input.birth_date,
        intention: input.intention.clone(),
    };

    let indicators = result
        .indicators
        .iter()
        .map(|i| IndicatorCard {
            title: i.title.clone(),
            value: i.value.clone(),
            color_hex: i.color_hex.clone(),
            number: i.number,
        })
        .collect();

    let reading = segment(&result.full_reading)
        .into_iter()
        .map(|s| match s.kind {
            SegmentKind::Heading => ReadingBlock::SectionTitle(s.text.to_uppercase()),
            SegmentKind::Paragraph => ReadingBlock::Body(s.text),
        })
        .collect();

    Report {
        header,
        indicators,
        reading,
        blessing: result.blessing.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Indicator;

    fn sample_input(intention: Option<&str>) -> UserInput {
        UserInput {
            full_name: "Nguyen Van A".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            intention: intention.map(String::from),
        }
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            introduction: "A luminous chart.".into(),
            main_color_description: "Soft indigo.".into(),
            main_color_hex: "#4B0082".into(),
            indicators: vec![
                Indicator {
                    title: "Life Path".into(),
                    value: "7".into(),
                    color_hex: None,
                    number: Some(7),
                },
                Indicator {
                    title: "Soul Urge".into(),
                    value: "11".into(),
                    color_hex: Some("#112233".into()),
                    number: Some(11),
                },
                Indicator {
                    title: "Expression".into(),
                    value: "3".into(),
                    color_hex: None,
                    number: Some(3),
                },
            ],
            full_reading: "## Con số chủ đạo\n\nThe path bends **gently** here.\n\nA second thought."
                .into(),
            blessing: "May your frequency stay clear.".into(),
        }
    }

    #[test]
    fn header_combines_input_and_result() {
        let report = render(&sample_input(None), &sample_result());
        assert_eq!(report.header.full_name, "Nguyen Van A");
        assert_eq!(report.header.introduction, "A luminous chart.");
        assert_eq!(report.header.main_color_hex, "#4B0082");
        assert_eq!(
            report.header.birth_date,
            NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()
        );
    }

    #[test]
    fn intention_included_only_when_present() {
        let without = render(&sample_input(None), &sample_result());
        assert_eq!(without.header.intention, None);

        let with = render(&sample_input(Some("find stillness")), &sample_result());
        assert_eq!(with.header.intention.as_deref(), Some("find stillness"));
    }

    #[test]
    fn indicator_order_is_preserved() {
        let report = render(&sample_input(None), &sample_result());
        let titles: Vec<&str> = report.indicators.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Life Path", "Soul Urge", "Expression"]);
    }

    #[test]
    fn headings_become_uppercase_section_titles() {
        let report = render(&sample_input(None), &sample_result());
        assert_eq!(
            report.reading[0],
            ReadingBlock::SectionTitle("CON SỐ CHỦ ĐẠO".into())
        );
    }

    #[test]
    fn paragraphs_keep_document_order_with_markup_stripped() {
        let report = render(&sample_input(None), &sample_result());
        assert_eq!(
            report.reading[1],
            ReadingBlock::Body("The path bends gently here.".into())
        );
        assert_eq!(report.reading[2], ReadingBlock::Body("A second thought.".into()));
        assert_eq!(report.reading.len(), 3);
    }

    #[test]
    fn blessing_is_appended() {
        let report = render(&sample_input(None), &sample_result());
        assert_eq!(report.blessing, "May your frequency stay clear.");
    }

    #[test]
    fn rendering_is_stable_across_calls() {
        let input = sample_input(Some("clarity"));
        let result = sample_result();
        assert_eq!(render(&input, &result), render(&input, &result));
    }
}
