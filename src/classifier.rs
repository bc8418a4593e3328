//! Classifier module.
//!
//! Matches raw text against a catalog and extracts its parameters.

use crate::catalog::Catalog;
use crate::error::ModifierError;
use crate::format::Parameters;
use crate::template::Template;
use std::sync::Arc;
use tracing::{debug, trace};

/// The outcome of classifying a piece of text.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The first template whose pattern matched.
    pub template: Arc<Template>,
    /// Parameters extracted with the template's format.
    pub parameters: Parameters,
}

/// Find the first template whose recognition pattern matches `text`.
///
/// Families are scanned plain, dynamic, conditional; templates within a
/// family in declaration order.
pub fn classify<'a>(catalog: &'a Catalog, text: &str) -> Option<&'a Arc<Template>> {
    catalog.iter().find(|template| template.is_match(text))
}

/// Classify `text` and extract its parameters.
///
/// # Errors
///
/// - `NoMatchingTemplate` if no template matches
/// - `ParameterExtractionFailed` if a template matches but its format
///   cannot extract the parameters
///
/// # Examples
///
/// ```rust
/// use statmod::catalog::Catalog;
/// use statmod::classifier::classify_and_parse;
/// use statmod::ModValue;
///
/// let catalog = Catalog::global().unwrap();
/// let found = classify_and_parse(&catalog, "+20 to Strength").unwrap();
/// assert_eq!(found.template.identifier(), "additional_strength");
/// assert_eq!(found.parameters.get("value"), Some(ModValue::Int(20)));
/// ```
pub fn classify_and_parse(catalog: &Catalog, text: &str) -> Result<Classification, ModifierError> {
    let Some(template) = classify(catalog, text) else {
        debug!(text, "no modifier template matched");
        return Err(ModifierError::NoMatchingTemplate {
            text: text.to_string(),
        });
    };

    let parameters = template.format().extract(text).ok_or_else(|| {
        debug!(
            text,
            identifier = template.identifier(),
            format = template.format().as_str(),
            "pattern matched but format extraction failed"
        );
        ModifierError::ParameterExtractionFailed {
            identifier: template.identifier().to_string(),
            text: text.to_string(),
        }
    })?;

    trace!(
        text,
        identifier = template.identifier(),
        family = ?template.family(),
        "classified modifier"
    );

    Ok(Classification {
        template: Arc::clone(template),
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use crate::numeric::ModValue;
    use crate::stat::{Stat, StatType};
    use crate::template::{Family, TemplateSpec};

    #[test]
    fn test_classify_plain() {
        let catalog = Catalog::global().unwrap();
        let found = classify_and_parse(&catalog, "+15% increased Strength").unwrap();
        assert_eq!(found.template.identifier(), "increased_strength_%");
        assert_eq!(found.parameters.value(), Some(ModValue::Int(15)));
    }

    #[test]
    fn test_classify_dynamic_and_conditional() {
        let catalog = Catalog::global().unwrap();
        let dynamic = classify_and_parse(&catalog, "3% more Spell Damage per Power Charge").unwrap();
        assert_eq!(dynamic.template.family(), Family::Dynamic);

        let conditional =
            classify_and_parse(&catalog, "Cannot be Stunned while holding a Shield").unwrap();
        assert_eq!(conditional.template.family(), Family::Conditional);
        assert_eq!(conditional.parameters.value(), None);
    }

    #[test]
    fn test_no_match() {
        let catalog = Catalog::global().unwrap();
        assert_eq!(
            classify_and_parse(&catalog, "+20 to Luck").unwrap_err(),
            ModifierError::NoMatchingTemplate {
                text: "+20 to Luck".to_string()
            }
        );
    }

    #[test]
    fn test_permissive_pattern_reports_extraction_failure() {
        // Pattern accepts decimals, format only integers.
        let catalog = CatalogBuilder::new()
            .template(TemplateSpec::plain(
                "sloppy",
                r"[0-9]+(?:\.[0-9]+)? to Strength",
                "{value:d} to Strength",
                [Stat::Strength],
                StatType::Base,
            ))
            .build()
            .unwrap();

        assert_eq!(
            classify_and_parse(&catalog, "1.5 to Strength").unwrap_err(),
            ModifierError::ParameterExtractionFailed {
                identifier: "sloppy".to_string(),
                text: "1.5 to Strength".to_string(),
            }
        );
    }

    #[test]
    fn test_first_match_wins_in_family_order() {
        let catalog = CatalogBuilder::new()
            .template(TemplateSpec::conditional(
                "conditional_first_declared",
                r"[0-9]+ to Strength",
                "{value:d} to Strength",
                [Stat::Strength],
                StatType::Base,
                vec![Arc::new(|| true)],
            ))
            .template(TemplateSpec::plain(
                "plain_a",
                r"[0-9]+ to Strength",
                "{value:d} to Strength",
                [Stat::Strength],
                StatType::Base,
            ))
            .template(TemplateSpec::plain(
                "plain_b",
                r"[0-9]+ to Strength",
                "{value:d} to Strength",
                [Stat::Strength],
                StatType::Base,
            ))
            .build()
            .unwrap();

        let found = classify(&catalog, "5 to Strength").unwrap();
        assert_eq!(found.identifier(), "plain_a");
    }
}
