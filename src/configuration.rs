use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub webdriver: WebDriverSettings,
    pub portal: PortalSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct WebDriverSettings {
    /// WebDriver endpoint, e.g. a chromedriver or a selenium hub.
    pub url: String,
    pub headless: bool,
}

#[derive(Deserialize, Clone)]
pub struct PortalSettings {
    pub email: String,
    pub password: String,
    pub login_url: String,
    /// Substring of the post-login location that marks the authenticated zone.
    pub authenticated_marker: String,
    pub detail_url: String,
    pub listing_url: String,
}

impl PortalSettings {
    pub fn detail_url_for(&self, work_id: &str) -> String {
        format!("{}/{}", self.detail_url.trim_end_matches('/'), work_id)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::PortalSettings;

    #[test]
    fn detail_url_joins_work_id() {
        let portal = PortalSettings {
            email: "pro@example.com".to_string(),
            password: "secret".to_string(),
            login_url: "https://www.vipreformas.es/registro-profesionales".to_string(),
            authenticated_marker: "zona-profesionales".to_string(),
            detail_url: "https://www.vipreformas.es/detalle-trabajo/".to_string(),
            listing_url: "https://www.vipreformas.es/trabajos-recibidos/".to_string(),
        };

        assert_eq!(
            portal.detail_url_for("12345"),
            "https://www.vipreformas.es/detalle-trabajo/12345"
        );
    }
}
