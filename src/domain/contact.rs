/// Contact form: three text fields and a local-only submit.
///
/// Submitting never leaves the process. It produces an acknowledgement
/// for the UI to show and clears the form. Validation (`check`) is the
/// input layer's job, the way a browser enforces `required` and
/// `type="email"` before the submit handler ever runs.

pub const ACKNOWLEDGEMENT: &str = "Thank you for your message! I will get back to you soon.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ORDER: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Email => "Email Address",
            Field::Message => "Your Message",
        }
    }

    fn next(self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }
}

/// Why a submit was blocked.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rejection {
    Missing(Field),
    MalformedEmail,
}

impl Rejection {
    /// The field to put the cursor back on.
    pub fn field(self) -> Field {
        match self {
            Rejection::Missing(f) => f,
            Rejection::MalformedEmail => Field::Email,
        }
    }

    pub fn notice(self) -> String {
        match self {
            Rejection::Missing(f) => format!("Please fill in: {}", f.label()),
            Rejection::MalformedEmail => "Please enter a valid email address".to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Acknowledgement {
    pub text: &'static str,
    pub sender: String,
}

#[derive(Clone, Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    focused: Option<Field>,
}

impl ContactForm {
    pub fn new() -> Self {
        ContactForm::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    #[allow(dead_code)]
    pub fn update_field(&mut self, field: Field, value: &str) {
        *self.slot(field) = value.to_string();
    }

    // ── Editing ──

    pub fn focused(&self) -> Option<Field> {
        self.focused
    }

    pub fn focus(&mut self, field: Field) {
        self.focused = Some(field);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focus_next(&mut self) {
        self.focused = Some(self.focused.map_or(Field::Name, Field::next));
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(f) = self.focused {
            if !c.is_control() {
                self.slot(f).push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(f) = self.focused {
            self.slot(f).pop();
        }
    }

    /// First empty field in form order, with browser `required` rules:
    /// name and message only need one char (spaces count), while the email
    /// is trimmed first, as an email input sanitizes its value.
    pub fn missing_required(&self) -> Option<Field> {
        Field::ORDER.into_iter().find(|&f| match f {
            Field::Email => self.email.trim().is_empty(),
            Field::Name | Field::Message => self.value(f).is_empty(),
        })
    }

    /// Everything that blocks a submit, first problem wins.
    pub fn check(&self) -> Option<Rejection> {
        if let Some(f) = self.missing_required() {
            return Some(Rejection::Missing(f));
        }
        if !is_valid_email(self.email.trim()) {
            return Some(Rejection::MalformedEmail);
        }
        None
    }

    /// Local acknowledgement; always succeeds and clears the form.
    pub fn submit(&mut self) -> Acknowledgement {
        let sender = std::mem::take(&mut self.name);
        let chars = self.message.chars().count();
        self.email.clear();
        self.message.clear();
        self.focused = None;
        tracing::info!(message_chars = chars, "contact form acknowledged locally");
        Acknowledgement { text: ACKNOWLEDGEMENT, sender }
    }
}

/// `local@domain` as an HTML email input accepts it: the local part is
/// letters, digits, dots and the usual symbols; the domain is one or more
/// dot-separated labels of letters, digits and inner hyphens.
pub fn is_valid_email(s: &str) -> bool {
    const LOCAL_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local.chars().all(|c| c.is_ascii_alphanumeric() || LOCAL_SYMBOLS.contains(c));
    local_ok && domain.split('.').all(is_domain_label)
}

fn is_domain_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_sets_one_field() {
        let mut form = ContactForm::new();
        form.update_field(Field::Email, "a@b.co");
        assert_eq!(form.value(Field::Email), "a@b.co");
        assert_eq!(form.value(Field::Name), "");
        form.update_field(Field::Email, "x@y.z");
        assert_eq!(form.value(Field::Email), "x@y.z");
    }

    #[test]
    fn submit_acknowledges_and_clears() {
        let mut form = ContactForm::new();
        form.update_field(Field::Name, "Sam");
        form.update_field(Field::Email, "sam@example.com");
        form.update_field(Field::Message, "Hello");
        form.focus(Field::Message);

        let ack = form.submit();
        assert_eq!(ack.text, ACKNOWLEDGEMENT);
        assert_eq!(ack.sender, "Sam");
        for f in Field::ORDER {
            assert_eq!(form.value(f), "");
        }
        assert_eq!(form.focused(), None);
    }

    #[test]
    fn missing_required_reports_first_empty() {
        let mut form = ContactForm::new();
        assert_eq!(form.missing_required(), Some(Field::Name));
        form.update_field(Field::Name, "Sam");
        assert_eq!(form.missing_required(), Some(Field::Email));
        form.update_field(Field::Email, "s@e.c");
        assert_eq!(form.missing_required(), Some(Field::Message));
        form.update_field(Field::Message, "hi");
        assert_eq!(form.missing_required(), None);
    }

    #[test]
    fn spaces_satisfy_required_except_for_email() {
        let mut form = ContactForm::new();
        form.update_field(Field::Name, " ");
        form.update_field(Field::Email, "   ");
        form.update_field(Field::Message, "  ");
        assert_eq!(form.missing_required(), Some(Field::Email));
        form.update_field(Field::Email, " sam@example.com ");
        assert_eq!(form.missing_required(), None);
        assert_eq!(form.check(), None);
    }

    #[test]
    fn check_rejects_malformed_email() {
        let mut form = ContactForm::new();
        form.update_field(Field::Name, "Sam");
        form.update_field(Field::Email, "not-an-email");
        form.update_field(Field::Message, "hi");
        assert_eq!(form.missing_required(), None);
        assert_eq!(form.check(), Some(Rejection::MalformedEmail));
        assert_eq!(Rejection::MalformedEmail.field(), Field::Email);

        form.update_field(Field::Email, "sam@example.com");
        assert_eq!(form.check(), None);

        form.update_field(Field::Email, "");
        form.update_field(Field::Name, "");
        assert_eq!(form.check(), Some(Rejection::Missing(Field::Name)));
        assert_eq!(Rejection::Missing(Field::Name).notice(), "Please fill in: Your Name");
    }

    #[test]
    fn email_rule_follows_html_inputs() {
        for ok in ["a@b", "sam@example.com", "first.last+tag@sub.example-host.io", "x_y@a1.b2"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "a@", "@b.com", "a b@c.com", "a@b..com", "a@-b.com", "a@b-.com", "a@b@c", "a@b_c.com", "a@.com"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = ContactForm::new();
        form.push_char('x');
        assert_eq!(form.value(Field::Name), "");

        form.focus_next();
        assert_eq!(form.focused(), Some(Field::Name));
        for c in "Alé".chars() {
            form.push_char(c);
        }
        form.push_char('\n');
        form.backspace();
        assert_eq!(form.value(Field::Name), "Al");

        form.focus_next();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused(), Some(Field::Name));
    }
}
