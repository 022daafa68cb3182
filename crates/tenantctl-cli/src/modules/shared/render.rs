use serde::Serialize;

use crate::cli_args::OutputFormat;

pub(crate) fn render_value<T: Serialize>(value: &T, output: OutputFormat) -> anyhow::Result<String> {
    let rendered = match output {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(value)?;
            text.push('\n');
            text
        }
    };
    Ok(rendered)
}

pub(crate) fn print_value<T: Serialize>(value: &T, output: OutputFormat) -> anyhow::Result<()> {
    print!("{}", render_value(value, output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_yaml_and_json() {
        let value = json!({"id": "u-1", "active": true});
        let yaml = render_value(&value, OutputFormat::Yaml).expect("yaml");
        assert!(yaml.contains("id: u-1"));
        assert!(yaml.contains("active: true"));

        let json = render_value(&value, OutputFormat::Json).expect("json");
        assert!(json.ends_with("}\n"));
        let back: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, value);
    }
}
