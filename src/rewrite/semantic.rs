

use super::lexicon::SYNONYM_GROUPS;

/// Whether two concepts name the same clinical idea: one contains the other,
/// or both belong to one synonym group.
pub fn semantic_match(concept1: &str, concept2: &str) -> bool {
    if concept1.contains(concept2) || concept2.contains(concept1) {
        return true;
    }

    SYNONYM_GROUPS.iter().any(|(key, values)| {
        let in_group = |concept: &str| concept == *key || values.contains(&concept);
        (values.contains(&concept1) && in_group(concept2))
            || (values.contains(&concept2) && in_group(concept1))
    })
}
