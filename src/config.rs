//! Support for library configuration options

/// Options a [`Generator`](crate::generator::Generator) is created with.
///
/// This is a plain value: there is no global configuration, so that several generators (and several calls) can coexist.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Part of the ProdID string that describes the organization (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
    pub org_name: String,
    /// Part of the ProdID string that describes the product name (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
    pub product_name: String,
}

impl Settings {
    pub fn new<S: Into<String>, T: Into<String>>(org_name: S, product_name: T) -> Self {
        Self { org_name: org_name.into(), product_name: product_name.into() }
    }

    /// The `PRODID` written in every generated calendar
    pub fn prod_id(&self) -> String {
        format!("-//{}//{}//EN", self.org_name, self.product_name)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new("Pimkit", "Pimkit")
    }
}
