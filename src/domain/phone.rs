#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl TryFrom<String> for Phone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("Este campo é obrigatório.".to_string());
        }

        let separators = ['-', '.', ' ', '(', ')'];
        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let only_digits_and_separators = body
            .chars()
            .all(|c| c.is_ascii_digit() || separators.contains(&c));
        let has_digit = body.chars().any(|c| c.is_ascii_digit());

        if !only_digits_and_separators || !has_digit {
            return Err("Informe um telefone válido.".to_string());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
