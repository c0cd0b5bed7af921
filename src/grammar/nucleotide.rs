//! DNA and RNA event patterns

use crate::variant::EventKind;

/// Build the six nucleotide event patterns for one sequence level
///
/// `group` names the outer group of each event, `position` matches one
/// coordinate token, and `base` matches one nucleotide. When `ranged_equality`
/// is false the level only supports whole-target equality (`=`).
pub(crate) fn nucleotide_events(
    group: impl Fn(EventKind) -> String,
    position: &str,
    base: &str,
    ranged_equality: bool,
) -> Vec<String> {
    let site = format!(
        "(?:(?P<start>{pos})_(?P<end>{pos})|(?P<position>{pos}))",
        pos = position
    );

    let equal = if ranged_equality {
        format!(
            "(?P<{}>{}?(?P<equal>=))",
            group(EventKind::Equality),
            site
        )
    } else {
        format!("(?P<{}>(?P<equal>=))", group(EventKind::Equality))
    };

    vec![
        equal,
        format!(
            "(?P<{}>(?P<position>{pos})(?P<ref>{nt})>(?P<new>{nt}))",
            group(EventKind::Substitution),
            pos = position,
            nt = base
        ),
        format!("(?P<{}>{}del)", group(EventKind::Deletion), site),
        format!("(?P<{}>{}dup)", group(EventKind::Duplication), site),
        format!(
            "(?P<{}>(?P<start>{pos})_(?P<end>{pos})ins(?P<seq>{nt}+))",
            group(EventKind::Insertion),
            pos = position,
            nt = base
        ),
        format!(
            "(?P<{}>{}delins(?P<seq>{}+))",
            group(EventKind::DeletionInsertion),
            site,
            base
        ),
    ]
}
