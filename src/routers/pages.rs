use crate::csrf;
use crate::domain::{Field, FormErrors, Subscription, SubscriptionForm};
use crate::utils::escape_html;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-br">
<head>
<meta http-equiv="content-type" content="text/html; charset=utf-8">
<title>{title} - Eventex</title>
</head>
<body>
{body}
<p><a href="/">Eventex</a></p>
</body>
</html>"#
    )
}

fn error_list(class: &str, messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut html = format!(r#"<ul class="{class}">"#);
    for message in messages {
        html.push_str(&format!("<li>{}</li>", escape_html(message)));
    }
    html.push_str("</ul>");
    html
}

/// The subscription form with the submitted values and their errors.
/// `csrf_token` goes into a hidden input and must come back with the post.
pub fn subscription_form(
    form: &SubscriptionForm,
    errors: &FormErrors,
    csrf_token: &str,
) -> String {
    let mut fields = format!(
        r#"<input type="hidden" name="{}" value="{}">"#,
        csrf::FIELD_NAME,
        escape_html(csrf_token),
    );
    fields.push('\n');
    for field in Field::ALL {
        let input_type = match field {
            Field::Email => "email",
            _ => "text",
        };
        fields.push_str(&format!(
            r#"<p><label for="id_{name}">{label}</label>{errors}<input type="{input_type}" name="{name}" id="id_{name}" value="{value}" required></p>"#,
            name = field.as_str(),
            label = field.label(),
            errors = error_list("errorlist", errors.field(field)),
            value = escape_html(form.value(field)),
        ));
        fields.push('\n');
    }

    let body = format!(
        r#"<h1>Inscrição</h1>
{non_field}
<form action="/inscricao/" method="post" novalidate>
{fields}<input type="submit" value="Enviar">
</form>"#,
        non_field = error_list("errorlist nonfield", errors.non_field()),
    );
    layout("Inscrição", &body)
}

pub fn subscription_detail(
    subscription: &Subscription,
    acknowledgement: Option<&str>,
) -> String {
    let message = acknowledgement
        .map(|m| format!(r#"<p class="message success">{}</p>"#, escape_html(m)))
        .unwrap_or_default();

    let body = format!(
        r#"{message}
<h1>Inscrição #{id}</h1>
<p>Obrigado por se inscrever, {name}!</p>
<dl>
<dt>Nome</dt><dd>{name}</dd>
<dt>CPF</dt><dd>{cpf}</dd>
<dt>Email</dt><dd>{email}</dd>
<dt>Telefone</dt><dd>{phone}</dd>
<dt>Data da inscrição</dt><dd>{created_at}</dd>
</dl>"#,
        id = subscription.id,
        name = escape_html(&subscription.name),
        cpf = escape_html(&subscription.cpf),
        email = escape_html(&subscription.email),
        phone = escape_html(&subscription.phone),
        created_at = subscription.created_at.date(),
    );
    layout("Inscrição", &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(title, &format!("<h1>{title}</h1>\n<p>{}</p>", escape_html(message)))
}
