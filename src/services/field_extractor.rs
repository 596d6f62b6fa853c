use std::future::Future;

use thirtyfour::{error::WebDriverError, By, WebDriver, WebElement};

/// Where a strategy reads its value from once the locator hits.
#[derive(Debug, Clone)]
pub enum ValueFrom {
    /// Element property, falling back to the attribute of the same name.
    /// Form inputs report their live value through the property.
    Prop(&'static str),
    /// Rendered text content.
    Text,
}

#[derive(Debug, Clone)]
pub struct Strategy {
    pub locator: By,
    pub value_from: ValueFrom,
}

impl Strategy {
    pub fn prop(locator: By, name: &'static str) -> Strategy {
        Strategy {
            locator,
            value_from: ValueFrom::Prop(name),
        }
    }

    pub fn text(locator: By) -> Strategy {
        Strategy {
            locator,
            value_from: ValueFrom::Text,
        }
    }
}

/// Ordered fallback chain for one logical field. The portal markup moves
/// around between releases, so the first-registered locator is the most
/// authoritative and later ones are survivors of past layouts.
pub struct FieldSpec {
    pub name: &'static str,
    pub strategies: Vec<Strategy>,
}

/// First non-empty probe result wins; strategies after it are never probed.
/// Whitespace-only values count as empty. No hit at all resolves to "".
pub(crate) async fn first_match<F, Fut>(strategies: &[Strategy], mut probe: F) -> String
where
    F: FnMut(&Strategy) -> Fut,
    Fut: Future<Output = Option<String>>,
{
    for strategy in strategies {
        if let Some(value) = probe(strategy).await {
            let value = value.trim().to_string();
            if !value.is_empty() {
                return value;
            }
        }
    }

    String::new()
}

/// Resolves a field against the live page. A strategy whose locator matches
/// nothing yields to the next one; an exhausted spec is an empty string.
/// Missing markup is a normal outcome here, never an error.
pub async fn extract_field(driver: &WebDriver, spec: &FieldSpec) -> String {
    let value = first_match(&spec.strategies, |strategy| {
        let strategy = strategy.clone();
        async move { probe_strategy(driver, &strategy).await }
    })
    .await;

    if value.is_empty() {
        log::debug!("No strategy matched for field {}", spec.name);
    }
    value
}

async fn probe_strategy(driver: &WebDriver, strategy: &Strategy) -> Option<String> {
    let Ok(element) = driver.find(strategy.locator.clone()).await else {
        return None;
    };

    match resolve_value(&element, &strategy.value_from).await {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read value behind {:?}: {:?}", strategy.locator, e);
            None
        }
    }
}

async fn resolve_value(
    element: &WebElement,
    value_from: &ValueFrom,
) -> Result<Option<String>, WebDriverError> {
    match value_from {
        ValueFrom::Text => Ok(Some(element.text().await?)),
        ValueFrom::Prop(name) => match element.prop(*name).await? {
            Some(value) => Ok(Some(value)),
            None => Ok(element.attr(*name).await?),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use thirtyfour::By;

    use super::{first_match, Strategy};

    fn strategies_of(len: usize) -> Vec<Strategy> {
        (0..len)
            .map(|i| Strategy::prop(By::Css(format!("input.field-{}", i)), "value"))
            .collect()
    }

    #[tokio::test]
    async fn first_non_empty_value_short_circuits() {
        let values = [Some("primera"), Some("segunda")];
        let strategies = strategies_of(values.len());
        let probes = Cell::new(0usize);

        let result = first_match(&strategies, |_| {
            let i = probes.get();
            probes.set(i + 1);
            let value = values[i].map(str::to_string);
            async move { value }
        })
        .await;

        assert_eq!(result, "primera");
        assert_eq!(probes.get(), 1);
    }

    #[tokio::test]
    async fn empty_hits_fall_through_to_later_strategies() {
        let values = [None, Some("   "), Some("tercera")];
        let strategies = strategies_of(values.len());
        let probes = Cell::new(0usize);

        let result = first_match(&strategies, |_| {
            let i = probes.get();
            probes.set(i + 1);
            let value = values[i].map(str::to_string);
            async move { value }
        })
        .await;

        assert_eq!(result, "tercera");
        assert_eq!(probes.get(), 3);
    }

    #[tokio::test]
    async fn exhausted_spec_is_empty_string() {
        let strategies = strategies_of(2);

        let result = first_match(&strategies, |_| async { None }).await;

        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn matched_values_are_trimmed() {
        let strategies = strategies_of(1);

        let result = first_match(&strategies, |_| async {
            Some("  912 345 678  ".to_string())
        })
        .await;

        assert_eq!(result, "912 345 678");
    }
}
