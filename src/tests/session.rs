use super::{Direction, Session, Shift};
use crate::edit_plan::Splice;
use crate::error::Error;
use crate::formats::rst::RstFormat;
use pretty_assertions::assert_eq;

const DOC: &str = "Title\n=====\n\nIntro\n\nSection\n-------\n\nBody\n\nOther\n-----\n\nText\n";

const NESTED: &str = "Title\n=====\n\nSub\n---\n\nText\n";

#[test]
fn test_outline_is_memoized_per_revision() {
    let mut session = Session::rst(DOC);

    assert_eq!(session.revision(), 0);
    assert_eq!(session.outline().len(), 3);

    session.replace_text("Only\n====\n");
    assert_eq!(session.revision(), 1);
    assert_eq!(session.outline().len(), 1);
    assert_eq!(session.outline().headings()[0].title, "Only");
}

#[test]
fn test_move_forward() {
    let mut session = Session::rst(DOC);

    // From the top-level intro there is no later top-level heading.
    assert_eq!(session.move_target(15, Direction::Forward, true), None);
    assert_eq!(session.move_target(15, Direction::Forward, false), Some(35));
    assert_eq!(session.move_target(38, Direction::Forward, true), Some(54));
}

#[test]
fn test_move_backward_lands_on_own_heading_first() {
    let mut session = Session::rst(DOC);

    assert_eq!(session.move_target(38, Direction::Backward, true), Some(35));
    assert_eq!(session.move_target(35, Direction::Backward, true), Some(11));
    assert_eq!(session.move_target(0, Direction::Backward, false), None);
}

#[test]
fn test_move_from_outside_any_section() {
    let text = "Preamble\n\nTitle\n=====\n\nBody\n";
    let mut session = Session::rst(text);

    assert_eq!(session.move_target(2, Direction::Forward, true), Some(21));
    assert_eq!(session.move_target(2, Direction::Backward, true), None);
}

#[test]
fn test_fold_region_is_body_only() {
    let mut session = Session::rst(DOC);

    assert_eq!(session.fold_region(38), Some(35..42));
    assert_eq!(session.fold_region(5), Some(11..DOC.len()));
    assert_eq!(session.fold_region(DOC.len() + 10), None);
}

#[test]
fn test_change_level_is_a_preview() {
    let mut session = Session::rst(NESTED);

    let splice = session.change_level(15, Shift::Demote).unwrap();
    assert_eq!(
        splice,
        Splice {
            range: 13..20,
            replacement: "Sub\n^^^".to_string(),
        }
    );
    assert_eq!(session.text(), NESTED);
}

#[test]
fn test_repeated_demotion_walks_a_stable_table() {
    let mut session = Session::rst(NESTED);

    session.relevel(15, Shift::Demote).unwrap().unwrap();
    assert_eq!(session.text(), "Title\n=====\n\nSub\n^^^\n\nText\n");

    // Reparsed, "^" is now the second style in use, but the cached table
    // still places it at level 2.
    session.relevel(15, Shift::Demote).unwrap().unwrap();
    assert_eq!(session.text(), "Title\n=====\n\nSub\n\"\"\"\n\nText\n");

    session.relevel(15, Shift::Promote).unwrap().unwrap();
    assert_eq!(session.text(), "Title\n=====\n\nSub\n^^^\n\nText\n");
}

#[test]
fn test_invalidate_drops_level_table() {
    let mut session = Session::rst(NESTED);

    session.relevel(15, Shift::Demote).unwrap().unwrap();
    session.invalidate();

    // Fresh table: "=" then "^" from the document, "-" is the next fallback.
    let splice = session.change_level(15, Shift::Demote).unwrap();
    assert_eq!(splice.replacement, "Sub\n---");
}

#[test]
fn test_other_heading_drops_level_table() {
    let mut session = Session::rst(NESTED);

    session.relevel(15, Shift::Demote).unwrap().unwrap();
    assert!(session.change_level(2, Shift::Promote).is_none());

    let splice = session.change_level(15, Shift::Demote).unwrap();
    assert_eq!(splice.replacement, "Sub\n---");
}

#[test]
fn test_promote_to_top_level() {
    let mut session = Session::rst(NESTED);

    session.relevel(15, Shift::Promote).unwrap().unwrap();
    assert_eq!(session.text(), "Title\n=====\n\nSub\n===\n\nText\n");
    assert_eq!(session.heading_at(15).unwrap().level, 0);
}

#[test]
fn test_level_change_out_of_range() {
    let mut session = Session::new(NESTED, RstFormat::with_levels(Vec::new()));

    assert!(session.change_level(2, Shift::Promote).is_none());
    assert!(session.change_level(15, Shift::Demote).is_none());
    assert!(session.relevel(15, Shift::Demote).unwrap().is_none());
    assert_eq!(session.text(), NESTED);
    assert!(session.change_level(15, Shift::Promote).is_some());
}

#[test]
fn test_level_change_outside_sections() {
    let mut session = Session::rst("Preamble only\n");

    assert!(session.change_level(0, Shift::Demote).is_none());
}

#[test]
fn test_demote_to_overline_style() {
    let levels = ["=", "-", "##"].iter().map(|s| s.parse().unwrap()).collect();
    let mut session = Session::new(NESTED, RstFormat::with_levels(levels));

    let splice = session.change_level(15, Shift::Demote).unwrap();
    assert_eq!(splice.replacement, "###\nSub\n###");
}

#[test]
fn test_normalize_resizes_adornment() {
    let mut session = Session::rst("Title\n==========\n\nBody\n");

    assert_eq!(
        session.normalize(2),
        Some(Splice {
            range: 0..16,
            replacement: "Title\n=====".to_string(),
        })
    );
    assert_eq!(session.normalize(19), None, "offset in the body");
}

#[test]
fn test_normalize_keeps_overline() {
    let mut session = Session::rst("#########\nTitle\n#########\n");

    let splice = session.normalize(12).unwrap();
    assert_eq!(splice.range, 0..25);
    assert_eq!(splice.replacement, "#####\nTitle\n#####");
}

#[test]
fn test_normalize_canonical_heading() {
    let mut session = Session::rst("Title\n=====\n");

    assert_eq!(session.normalize(0), None);
}

#[test]
fn test_apply_rejects_bad_splice() {
    let mut session = Session::rst(NESTED);
    let splice = Splice {
        range: 20..400,
        replacement: String::new(),
    };

    assert!(matches!(
        session.apply(&splice),
        Err(Error::OutOfBounds { len: 27, .. })
    ));
    assert_eq!(session.text(), NESTED);
    assert_eq!(session.revision(), 0);
}

#[test]
fn test_apply_reparses() {
    let mut session = Session::rst(NESTED);
    let splice = Splice {
        range: 13..20,
        replacement: "Renamed\n-------".to_string(),
    };

    session.apply(&splice).unwrap();
    assert_eq!(session.heading_at(15).unwrap().title, "Renamed");
}

#[test]
fn test_edit_carries_path() {
    let mut session = Session::rst(NESTED).with_path("doc.rst");
    let splice = session.change_level(15, Shift::Promote).unwrap();
    let edit = session.edit(splice, "Sub");

    assert_eq!(edit.file_name, "doc.rst");
    assert_eq!((edit.byte_start, edit.byte_end), (13, 20));
    assert_eq!(edit.replacement, "Sub\n===");
    assert_eq!(edit.item_name, "Sub");
}

#[test]
fn test_fold_region_on_crlf_text() {
    let text = "Title\r\n=====\r\n\r\nBody\r\n\r\nNext\r\n====\r\n";
    let mut session = Session::rst(text);

    assert_eq!(session.fold_region(17), Some(12..22));
    assert_eq!(&text[12..22], "\r\n\r\nBody\r\n");
}
