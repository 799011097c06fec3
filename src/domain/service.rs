use crate::domain::pricing::{self, Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    Video,
    Photography,
    Music,
    Events,
    Design,
}

/// A named pricing tier within a service.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Package {
    pub name: String,
    /// Display price, e.g. `"MK 250,000"`.
    pub price: String,
    pub turnaround: String,
}

/// A bookable studio service as listed in the catalog.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ServiceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Entry price shown on the catalog tile, e.g. `"MK 150,000"`.
    pub price_start: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl ServiceItem {
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Display price for the chosen package, or the entry price when none is chosen.
    pub fn price_for(&self, package: Option<&str>) -> &str {
        package
            .and_then(|name| self.package(name))
            .map(|p| p.price.as_str())
            .unwrap_or(&self.price_start)
    }

    pub fn deposit_for(&self, package: Option<&str>) -> Money {
        pricing::deposit_for(self.price_for(package))
    }
}

fn package(name: &str, price: &str, turnaround: &str) -> Package {
    Package {
        name: name.to_string(),
        price: price.to_string(),
        turnaround: turnaround.to_string(),
    }
}

/// The catalog the studio ships with when no configuration overrides it.
pub fn studio_catalog() -> Vec<ServiceItem> {
    vec![
        ServiceItem {
            id: "s1".to_string(),
            title: "Wedding Video Packages".to_string(),
            description: "Cinematic coverage of your wedding day, from preparations to reception."
                .to_string(),
            price_start: "MK 150,000".to_string(),
            category: ServiceCategory::Video,
            packages: vec![
                package("Silver Package", "MK 150,000", "3 weeks"),
                package("Gold Package", "MK 250,000", "2 weeks"),
                package("Platinum Package", "MK 400,000", "10 days"),
            ],
        },
        ServiceItem {
            id: "s2".to_string(),
            title: "Photography Sessions".to_string(),
            description: "Studio and outdoor portrait, family and product shoots.".to_string(),
            price_start: "MK 50,000".to_string(),
            category: ServiceCategory::Photography,
            packages: vec![
                package("Mini Session", "MK 50,000", "5 days"),
                package("Full Session", "MK 90,000", "1 week"),
            ],
        },
        ServiceItem {
            id: "s3".to_string(),
            title: "Music Production".to_string(),
            description: "Recording, mixing and mastering in our in-house studio.".to_string(),
            price_start: "MK 80,000".to_string(),
            category: ServiceCategory::Music,
            packages: vec![
                package("Single Track", "MK 80,000", "2 weeks"),
                package("EP Bundle", "MK 300,000", "6 weeks"),
            ],
        },
        ServiceItem {
            id: "s4".to_string(),
            title: "Event Coverage".to_string(),
            description: "Photo and video crews for conferences, launches and parties."
                .to_string(),
            price_start: "MK 120,000".to_string(),
            category: ServiceCategory::Events,
            packages: vec![
                package("Half Day", "MK 120,000", "1 week"),
                package("Full Day", "MK 200,000", "10 days"),
            ],
        },
        ServiceItem {
            id: "s5".to_string(),
            title: "Graphic Design".to_string(),
            description: "Logos, posters and album artwork.".to_string(),
            price_start: "MK 30,000".to_string(),
            category: ServiceCategory::Design,
            packages: vec![package("Logo Design", "MK 30,000", "5 days")],
        },
    ]
}
