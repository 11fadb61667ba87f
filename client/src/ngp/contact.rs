//! Shared contact schema for the NGP services.

use crate::payload::PayloadWriter;

/// Contact details shared by the contribution and volunteer services.
///
/// Slots default to empty; fill the ones you have with struct-update syntax.
/// Field names on the wire are case-sensitive and serialized in a fixed
/// order, regardless of which slots were set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub prefix: String,
    pub suffix: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub salutation: String,
    pub email: String,
    pub home_phone: String,
    pub work_phone: String,
    pub work_extension: String,
    pub fax_phone: String,
    pub employer: String,
    pub occupation: String,
    /// Opt in to further contact from the campaign.
    pub opt_in: bool,
}

impl Contact {
    /// Write the contact elements in wire order.
    pub(crate) fn write_elements(&self, w: &mut PayloadWriter) {
        w.element("LastName", &self.last_name);
        w.element("FirstName", &self.first_name);
        w.element("MiddleName", &self.middle_name);
        w.element("Prefix", &self.prefix);
        w.element("Suffix", &self.suffix);
        w.element("Address1", &self.address1);
        w.element("Address2", &self.address2);
        w.element("Address3", &self.address3);
        w.element("City", &self.city);
        w.element("State", &self.state);
        w.element("Zip", &self.zip);
        w.element("Salutation", &self.salutation);
        w.element("Email", &self.email);
        w.element("HomePhone", &self.home_phone);
        w.element("WorkPhone", &self.work_phone);
        w.element("WorkExtension", &self.work_extension);
        w.element("FaxPhone", &self.fax_phone);
        w.element("Employer", &self.employer);
        w.element("Occupation", &self.occupation);
        w.flag("OptIn", self.opt_in);
    }

    /// Whether the slot named by `field` is unset.
    ///
    /// Returns `None` for names that are not contact fields so callers can
    /// chain their own sections.
    pub(crate) fn is_blank(&self, field: &str) -> Option<bool> {
        let blank = match field {
            "LastName" => self.last_name.is_empty(),
            "FirstName" => self.first_name.is_empty(),
            "MiddleName" => self.middle_name.is_empty(),
            "Prefix" => self.prefix.is_empty(),
            "Suffix" => self.suffix.is_empty(),
            "Address1" => self.address1.is_empty(),
            "Address2" => self.address2.is_empty(),
            "Address3" => self.address3.is_empty(),
            "City" => self.city.is_empty(),
            "State" => self.state.is_empty(),
            "Zip" => self.zip.is_empty(),
            "Salutation" => self.salutation.is_empty(),
            "Email" => self.email.is_empty(),
            "HomePhone" => self.home_phone.is_empty(),
            "WorkPhone" => self.work_phone.is_empty(),
            "WorkExtension" => self.work_extension.is_empty(),
            "FaxPhone" => self.fax_phone.is_empty(),
            "Employer" => self.employer.is_empty(),
            "Occupation" => self.occupation.is_empty(),
            "OptIn" => !self.opt_in,
            _ => return None,
        };
        Some(blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_order_is_fixed() {
        let contact = Contact {
            first_name: "John".into(),
            last_name: "Doe".into(),
            ..Contact::default()
        };
        let mut w = PayloadWriter::new();
        contact.write_elements(&mut w);
        let xml = w.finish();

        // LastName precedes FirstName on the wire no matter how the struct
        // was filled.
        assert!(xml.starts_with("<LastName>Doe</LastName><FirstName>John</FirstName>"));
        assert!(xml.ends_with("<OptIn>false</OptIn>"));
    }

    #[test]
    fn unset_slots_serialize_self_closing() {
        let mut w = PayloadWriter::new();
        Contact::default().write_elements(&mut w);
        let xml = w.finish();
        assert!(xml.contains("<MiddleName/>"));
        assert!(xml.contains("<Employer/>"));
    }

    #[test]
    fn blankness_by_wire_name() {
        let contact = Contact {
            email: "john.doe@example.com".into(),
            ..Contact::default()
        };
        assert_eq!(contact.is_blank("Email"), Some(false));
        assert_eq!(contact.is_blank("Zip"), Some(true));
        assert_eq!(contact.is_blank("OptIn"), Some(true));
        assert_eq!(contact.is_blank("Cycle"), None);
    }
}
