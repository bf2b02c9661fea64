/// Brazilian taxpayer registry number, kept as the 11-digit string it was
/// submitted as. No checksum verification is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpf(String);

impl Cpf {
    pub const LENGTH: usize = 11;
}

impl TryFrom<String> for Cpf {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("Este campo é obrigatório.".to_string());
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err("CPF deve conter apenas números.".to_string());
        }
        if value.len() != Self::LENGTH {
            return Err("CPF deve ter 11 números.".to_string());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
