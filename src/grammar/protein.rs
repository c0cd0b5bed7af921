//! Protein event patterns

use crate::variant::EventKind;

/// Build the seven protein event patterns
///
/// `amino_acid` matches one three-letter residue code and `number` one
/// position number. Protein equality is `=`, the uncertain `(=)`, or a
/// residue-scoped `Leu12=`; there is no protein range equality.
pub(crate) fn protein_events(
    group: impl Fn(EventKind) -> String,
    amino_acid: &str,
    number: &str,
) -> Vec<String> {
    let aa_pos = format!("(?:{}{})", amino_acid, number);
    let site = format!(
        "(?:(?P<start>{pos})_(?P<end>{pos})|(?P<position>{pos}))",
        pos = aa_pos
    );

    vec![
        format!(
            r"(?P<{}>(?:(?P<position>{})?(?P<equal>=))|(?P<equal_sy>\(=\)))",
            group(EventKind::Equality),
            aa_pos
        ),
        format!(
            "(?P<{}>(?P<position>{})(?P<new>{}))",
            group(EventKind::Substitution),
            aa_pos,
            amino_acid
        ),
        format!(
            "(?P<{}>(?P<position>{})fs)",
            group(EventKind::Frameshift),
            aa_pos
        ),
        format!("(?P<{}>{}del)", group(EventKind::Deletion), site),
        format!("(?P<{}>{}dup)", group(EventKind::Duplication), site),
        format!(
            "(?P<{}>(?P<start>{pos})_(?P<end>{pos})ins(?P<seq>{aa}+))",
            group(EventKind::Insertion),
            pos = aa_pos,
            aa = amino_acid
        ),
        format!(
            "(?P<{}>{}delins(?P<seq>{}+))",
            group(EventKind::DeletionInsertion),
            site,
            amino_acid
        ),
    ]
}
