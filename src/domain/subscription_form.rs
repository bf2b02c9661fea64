use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::cpf::Cpf;
use crate::domain::phone::Phone;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_name::SubscriberName;
use crate::domain::subscription::NewSubscription;

pub const REQUIRED_FIELD_MESSAGE: &str = "Este campo é obrigatório.";
pub const MISSING_FIELDS_MESSAGE: &str =
    "Preencha todos os campos obrigatórios.";

/// Raw form submission. Absent fields deserialize to empty strings so that
/// they are reported as validation errors.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SubscriptionForm {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
}

impl SubscriptionForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Cpf => &self.cpf,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }
}

/// Form fields in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Cpf,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 4] =
        [Field::Name, Field::Cpf, Field::Email, Field::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Cpf => "cpf",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Nome",
            Field::Cpf => "CPF",
            Field::Email => "Email",
            Field::Phone => "Telefone",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<Field, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn field(&self, field: Field) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.fields.iter().map(|(f, m)| (*f, m.as_slice()))
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self.non_field.clone();
        for (field, messages) in self.fields() {
            parts.push(format!("{field}: {}", messages.join(" ")));
        }
        f.write_str(&parts.join("; "))
    }
}

impl TryFrom<&SubscriptionForm> for NewSubscription {
    type Error = FormErrors;

    fn try_from(form: &SubscriptionForm) -> Result<Self, Self::Error> {
        validate(form)
    }
}

/// Checks every field independently and collects all failures.
pub fn validate(form: &SubscriptionForm) -> Result<NewSubscription, FormErrors> {
    let mut errors = FormErrors::default();

    for field in Field::ALL {
        if form.value(field).trim().is_empty() {
            errors.add(field, REQUIRED_FIELD_MESSAGE);
        }
    }
    if !errors.is_empty() {
        errors.add_non_field(MISSING_FIELDS_MESSAGE);
    }

    let name = parse_field(&mut errors, Field::Name, &form.name, |v| {
        SubscriberName::try_from(v)
    });
    let cpf =
        parse_field(&mut errors, Field::Cpf, &form.cpf, |v| Cpf::try_from(v));
    let email = parse_field(&mut errors, Field::Email, &form.email, |v| {
        SubscriberEmail::try_from(v)
    });
    let phone = parse_field(&mut errors, Field::Phone, &form.phone, |v| {
        Phone::try_from(v)
    });

    match (name, cpf, email, phone) {
        (Some(name), Some(cpf), Some(email), Some(phone)) if errors.is_empty() => {
            Ok(NewSubscription {
                name,
                cpf,
                email,
                phone,
            })
        }
        _ => Err(errors),
    }
}

// Blank fields already carry the required message.
fn parse_field<T>(
    errors: &mut FormErrors,
    field: Field,
    value: &str,
    parse: impl FnOnce(String) -> Result<T, String>,
) -> Option<T> {
    if value.trim().is_empty() {
        return None;
    }
    match parse(value.to_string()) {
        Ok(parsed) => Some(parsed),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}
