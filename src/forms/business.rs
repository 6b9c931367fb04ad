use super::catalog::{optional, required};
use super::Draft;
use crate::business::{
    Address, Business, BusinessInput, Contact, ContactKind, GeoPoint, Website,
    BUSINESS_CATEGORIES,
};
use crate::error::{Error, Result};

/// Draft of a business listing. Coordinates stay text until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub longitude: String,
    pub latitude: String,
    pub address: Address,
    pub base_image: String,
    pub images: Vec<String>,
    pub contacts: Vec<Contact>,
    pub websites: Vec<Website>,
}

impl From<&Business> for BusinessDraft {
    fn from(business: &Business) -> Self {
        Self {
            name: business.name.clone(),
            category: business.category.clone(),
            description: business.description.clone().unwrap_or_default(),
            longitude: business.location.longitude().to_string(),
            latitude: business.location.latitude().to_string(),
            address: business.address.clone(),
            base_image: business.base_image.clone(),
            images: business.images.clone(),
            contacts: business.contacts.clone(),
            websites: business.websites.clone(),
        }
    }
}

impl BusinessDraft {
    pub fn with_image(mut self, url: &str) -> Result<Self> {
        self.images.push(required(url, "Please provide an image URL")?);
        Ok(self)
    }

    pub fn without_image(mut self, index: usize) -> Self {
        if index < self.images.len() {
            self.images.remove(index);
        }
        self
    }

    pub fn with_contact(mut self, kind: ContactKind, value: &str) -> Result<Self> {
        self.contacts.push(Contact {
            kind,
            value: required(value, "Please provide a contact value")?,
        });
        Ok(self)
    }

    pub fn without_contact(mut self, index: usize) -> Self {
        if index < self.contacts.len() {
            self.contacts.remove(index);
        }
        self
    }

    /// Append a website of type `main`
    pub fn with_website(mut self, url: &str) -> Result<Self> {
        let url = required(url, "Please provide a website URL")?;
        self.websites.push(Website::main(&url));
        Ok(self)
    }

    pub fn without_website(mut self, index: usize) -> Self {
        if index < self.websites.len() {
            self.websites.remove(index);
        }
        self
    }

    fn location(&self) -> Result<GeoPoint> {
        let parse = |text: &str| text.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        match (parse(&self.longitude), parse(&self.latitude)) {
            (Some(lng), Some(lat))
                if (-180.0..=180.0).contains(&lng) && (-90.0..=90.0).contains(&lat) =>
            {
                Ok(GeoPoint::new(lng, lat))
            }
            (Some(_), Some(_)) => Err(Error::validation("Coordinates are out of range")),
            _ => Err(Error::validation(
                "Please provide both longitude and latitude",
            )),
        }
    }

    fn address(&self) -> Result<Address> {
        let a = &self.address;
        Ok(Address {
            street: required(&a.street, "Please provide a street")?,
            city: required(&a.city, "Please provide a city")?,
            state: required(&a.state, "Please provide a state")?,
            country: required(&a.country, "Please provide a country")?,
            postal_code: required(&a.postal_code, "Please provide a postal code")?,
        })
    }
}

impl Draft for BusinessDraft {
    type Payload = BusinessInput;

    fn validate(&self) -> Result<BusinessInput> {
        let name = required(&self.name, "Please provide a business name")?;
        let category = required(&self.category, "Please select a category")?;
        if !BUSINESS_CATEGORIES.contains(&category.as_str()) {
            return Err(Error::validation(format!("Unknown category: {}", category)));
        }

        Ok(BusinessInput {
            name,
            category,
            description: optional(&self.description),
            location: self.location()?,
            address: self.address()?,
            base_image: required(&self.base_image, "Please provide a base image")?,
            images: self.images.clone(),
            contacts: self.contacts.clone(),
            websites: self.websites.clone(),
        })
    }
}
