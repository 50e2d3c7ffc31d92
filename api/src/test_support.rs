use common::persistence::models::marketplace::{Part, PartRow, Seller, Vehicle};
use uuid::Uuid;

pub(crate) fn part_id(n: u128) -> Uuid {
    Uuid::from_u128(0x1000 + n)
}

fn at_minute(minute: u32) -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
        .and_then(|d| d.and_hms_opt(8, minute, 0))
        .expect("valid fixture timestamp")
}

fn seller(n: u128, name: &str, kind: &str, province: &str, city: &str, verified: bool) -> Seller {
    Seller {
        id: Uuid::from_u128(0x3000 + n),
        business_name: name.to_string(),
        business_type: kind.to_string(),
        province: province.to_string(),
        city: city.to_string(),
        is_verified: verified,
        created_at: at_minute(0),
    }
}

fn vehicle(n: u128, seller: &Seller, year: i32, make: &str, model: &str) -> Vehicle {
    Vehicle {
        id: Uuid::from_u128(0x2000 + n),
        seller_id: seller.id,
        year,
        make: make.to_string(),
        model: model.to_string(),
        variant: None,
        created_at: at_minute(0),
    }
}

#[allow(clippy::too_many_arguments)]
fn part(
    n: u128,
    vehicle: &Vehicle,
    seller: &Seller,
    name: &str,
    part_number: &str,
    price: f64,
    condition: &str,
    status: &str,
    listed: bool,
) -> PartRow {
    let part = Part {
        id: part_id(n),
        seller_id: seller.id,
        vehicle_id: vehicle.id,
        name: name.to_string(),
        description: format!("{name} removed from a {} {}", vehicle.make, vehicle.model),
        part_number: part_number.to_string(),
        price,
        condition: condition.to_string(),
        status: status.to_string(),
        is_listed_on_marketplace: listed,
        created_at: at_minute(n as u32),
        updated_at: at_minute(n as u32),
    };
    (part, vehicle.clone(), seller.clone())
}

/// Six visible listings plus one each from an unverified seller, a sold part and an
/// unlisted part.
pub(crate) fn catalogue() -> Vec<PartRow> {
    let jhb = seller(1, "Jozi Dismantlers", "DISMANTLER", "Gauteng", "Johannesburg", true);
    let cpt = seller(2, "Cape Scrap", "SCRAPYARD", "Western Cape", "Cape Town", true);
    let pta = seller(3, "Pretoria Motors", "DEALER", "Gauteng", "Pretoria", false);

    let corolla = vehicle(1, &jhb, 2015, "Toyota", "Corolla");
    let hilux = vehicle(2, &cpt, 2018, "Toyota", "Hilux");
    let polo = vehicle(3, &jhb, 2012, "Volkswagen", "Polo");
    let ranger = vehicle(4, &pta, 2020, "Ford", "Ranger");

    vec![
        part(1, &corolla, &jhb, "Headlight assembly", "HL-COR-15", 1500.0, "GOOD", "AVAILABLE", true),
        part(2, &corolla, &jhb, "Alternator", "ALT-1ZR-80A", 850.0, "EXCELLENT", "AVAILABLE", true),
        part(3, &hilux, &cpt, "Front bumper", "FB-HLX-18", 4200.0, "FAIR", "AVAILABLE", true),
        part(4, &hilux, &cpt, "Gearbox", "GBX-2GD-18", 18500.0, "GOOD", "AVAILABLE", true),
        part(5, &polo, &jhb, "Side mirror", "SM-POLO-L", 650.0, "NEW", "AVAILABLE", true),
        part(6, &polo, &jhb, "Engine block", "EB-CBZ-12", 32000.0, "FAIR", "AVAILABLE", true),
        part(7, &ranger, &pta, "Tailgate", "TG-RNG-20", 5200.0, "GOOD", "AVAILABLE", true),
        part(8, &corolla, &jhb, "Radiator", "RAD-COR-15", 1200.0, "GOOD", "SOLD", true),
        part(9, &hilux, &cpt, "Door panel", "DP-HLX-18", 2300.0, "POOR", "AVAILABLE", false),
    ]
}
