use serde::Serialize;

#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormat {
    pub pretty: bool,
}

impl OutputFormat {
    fn render<T: Serialize>(self, value: &T) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }

    pub fn success<T: Serialize>(self, data: T) -> anyhow::Result<()> {
        let response = CliResponse {
            success: true,
            api_version: env!("CARGO_PKG_VERSION"),
            data: Some(data),
            error: None,
        };
        println!("{}", self.render(&response)?);
        Ok(())
    }

    pub fn list<T: Serialize>(self, items: Vec<T>) -> anyhow::Result<()> {
        let count = items.len();
        self.success(ListResponse { items, count })
    }

    /// Writes an error response to stderr and exits with status 1.
    pub fn error(self, message: &str) -> ! {
        let response: CliResponse<()> = CliResponse {
            success: false,
            api_version: env!("CARGO_PKG_VERSION"),
            data: None,
            error: Some(message.to_string()),
        };
        match self.render(&response) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", message),
        }
        std::process::exit(1);
    }
}
