// Integration tests: every write-time rule, exercised through Registry::save

use civic_registry::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Registry seeded with one region → municipality → zone and both dwelling types
struct Fixture {
    registry: Registry,
    zone_id: i64,
    particular_id: i64,
    bloque_id: i64,
    owner_type_id: i64,
    member_type_id: i64,
}

fn fixture() -> Fixture {
    let mut registry = Registry::open_in_memory().unwrap();

    let region_id = registry.save(&mut Region::new("Arequipa")).unwrap();
    let municipality_id = registry
        .save(&mut Municipality::new("Cayma", region_id).with_budget(dec("150000.50")))
        .unwrap();
    let zone_id = registry
        .save(&mut UrbanZone::new("Zona Norte", municipality_id))
        .unwrap();

    let particular_id = registry.save(&mut DwellingType::new("Particular")).unwrap();
    let bloque_id = registry.save(&mut DwellingType::new("BloqueCasa")).unwrap();

    let owner_type_id = registry.save(&mut PersonType::new("Owner")).unwrap();
    let member_type_id = registry.save(&mut PersonType::new("Member")).unwrap();

    Fixture {
        registry,
        zone_id,
        particular_id,
        bloque_id,
        owner_type_id,
        member_type_id,
    }
}

impl Fixture {
    fn dwelling(&mut self, street: &str, number: i64, type_id: i64) -> i64 {
        self.registry
            .save(&mut Dwelling::new(street, number, 4001, self.zone_id, type_id))
            .unwrap()
    }

    fn family(&mut self, name: &str) -> i64 {
        self.registry.save(&mut Family::new(name).with_members(3)).unwrap()
    }

    /// Family with an owner-typed person and an Owner record earning `income`
    fn family_with_owner(&mut self, name: &str, income: &str) -> (i64, i64) {
        let family_id = self.family(name);
        let person_id = self
            .registry
            .save(&mut Person::new("Ana", family_id, self.owner_type_id))
            .unwrap();
        self.registry
            .save(&mut Owner::new(person_id, dec(income)))
            .unwrap();
        (family_id, person_id)
    }
}

fn validation_fields(err: &RegistryError) -> Vec<String> {
    err.validation()
        .unwrap_or_else(|| panic!("expected validation error, got {:?}", err))
        .errors()
        .iter()
        .map(|e| e.field.clone())
        .collect()
}

// ============================================================================
// GEOGRAPHY
// ============================================================================

#[test]
fn test_names_are_unique() {
    let mut f = fixture();

    let err = f.registry.save(&mut Region::new("Arequipa")).unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate { entity: "region", .. }));

    let err = f
        .registry
        .save(&mut DwellingType::new("Particular"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate { .. }));
}

#[test]
fn test_missing_parent_is_reported() {
    let mut f = fixture();

    let err = f
        .registry
        .save(&mut Municipality::new("Yura", 999))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::MissingReference { entity: "municipality", .. }
    ));
}

#[test]
fn test_update_keeps_id_and_logs_event() {
    let mut f = fixture();

    let mut region = Region::new("Puno");
    let id = f.registry.save(&mut region).unwrap();
    assert_eq!(region.id, Some(id));

    region.name = "Puno Sur".to_string();
    region.status = Status::Inactive;
    assert_eq!(f.registry.save(&mut region).unwrap(), id);

    let loaded: Region = f.registry.get(id).unwrap();
    assert_eq!(loaded.name, "Puno Sur");
    assert_eq!(loaded.status, Status::Inactive);

    let events = f.registry.events_for::<Region>(id).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, "updated");
    assert_eq!(events[1].event_type, "created");
    assert_eq!(events[0].data["name"], "Puno Sur");
}

#[test]
fn test_failed_save_leaves_nothing_behind() {
    let mut f = fixture();
    let before = f.registry.count::<Region>().unwrap();
    let events_before = count_events(f.registry.connection()).unwrap();

    assert!(f.registry.save(&mut Region::new("")).is_err());

    assert_eq!(f.registry.count::<Region>().unwrap(), before);
    assert_eq!(count_events(f.registry.connection()).unwrap(), events_before);
}

#[test]
fn test_delete_cascades_down_the_hierarchy() {
    let mut f = fixture();
    let dwelling_id = f.dwelling("A1", 10, f.particular_id);
    let (family_id, _) = f.family_with_owner("Quispe", "1500.00");
    let house_id = f
        .registry
        .save(&mut House::new(dwelling_id, family_id, dec("80.50")))
        .unwrap();
    f.registry
        .save(&mut TaxPayment::new(house_id, PaymentStatus::InProcess))
        .unwrap();

    let region_id = f.registry.list::<Region>().unwrap()[0].id.unwrap();
    f.registry.delete::<Region>(region_id).unwrap();

    assert_eq!(f.registry.count::<Municipality>().unwrap(), 0);
    assert_eq!(f.registry.count::<UrbanZone>().unwrap(), 0);
    assert_eq!(f.registry.count::<Dwelling>().unwrap(), 0);
    assert_eq!(f.registry.count::<House>().unwrap(), 0);
    assert_eq!(f.registry.count::<TaxPayment>().unwrap(), 0);

    // Families are not part of the geography
    assert_eq!(f.registry.count::<Family>().unwrap(), 1);
    assert_eq!(f.registry.count::<Owner>().unwrap(), 1);

    let events = f.registry.events_for::<Region>(region_id).unwrap();
    assert_eq!(events[0].event_type, "deleted");
}

#[test]
fn test_delete_missing_record() {
    let mut f = fixture();
    assert!(matches!(
        f.registry.delete::<Family>(404),
        Err(RegistryError::NotFound { entity: "family", id: 404 })
    ));
}

// ============================================================================
// DWELLINGS
// ============================================================================

#[test]
fn test_street_and_number_are_unique() {
    let mut f = fixture();
    f.dwelling("B2", 5, f.particular_id);

    let err = f
        .registry
        .save(&mut Dwelling::new("B2", 5, 4002, f.zone_id, f.particular_id))
        .unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate { entity: "dwelling", .. }));

    // Same street, other number is fine
    f.dwelling("B2", 6, f.particular_id);
}

#[test]
fn test_dwelling_type_lookup() {
    let mut f = fixture();
    let dwelling_id = f.dwelling("C3", 1, f.bloque_id);

    let dwelling_type = f.registry.dwelling_type_of(dwelling_id).unwrap().unwrap();
    assert_eq!(dwelling_type.kind(), DwellingKind::BlockOfUnits);
    assert!(f.registry.dwelling_type_of(999).unwrap().is_none());
}

// ============================================================================
// PERSONS + OWNERS
// ============================================================================

#[test]
fn test_one_owner_person_per_family() {
    let mut f = fixture();
    let family_id = f.family("Mamani");

    f.registry
        .save(&mut Person::new("Luis", family_id, f.owner_type_id))
        .unwrap();
    f.registry
        .save(&mut Person::new("Rosa", family_id, f.member_type_id))
        .unwrap();

    let err = f
        .registry
        .save(&mut Person::new("Jorge", family_id, f.owner_type_id))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["person_type_id"]);

    // Another family may have its own owner
    let other = f.family("Condori");
    f.registry
        .save(&mut Person::new("Jorge", other, f.owner_type_id))
        .unwrap();
}

#[test]
fn test_owner_person_can_be_updated_in_place() {
    let mut f = fixture();
    let family_id = f.family("Huaman");

    let mut owner_person = Person::new("Luis", family_id, f.owner_type_id);
    f.registry.save(&mut owner_person).unwrap();

    owner_person.name = "Luis Alberto".to_string();
    f.registry.save(&mut owner_person).unwrap();

    // Promoting a member to owner is rejected while the owner exists
    let mut member = Person::new("Rosa", family_id, f.member_type_id);
    f.registry.save(&mut member).unwrap();
    member.person_type_id = f.owner_type_id;
    assert!(f.registry.save(&mut member).is_err());
}

#[test]
fn test_owner_requires_owner_person_type() {
    let mut f = fixture();
    let family_id = f.family("Flores");
    let member_id = f
        .registry
        .save(&mut Person::new("Rosa", family_id, f.member_type_id))
        .unwrap();

    let err = f
        .registry
        .save(&mut Owner::new(member_id, dec("1200.00")))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["person_id"]);
}

#[test]
fn test_one_owner_record_per_person() {
    let mut f = fixture();
    let (_, person_id) = f.family_with_owner("Ramos", "900.00");

    let err = f
        .registry
        .save(&mut Owner::new(person_id, dec("2000.00")))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["person_id"]);
}

#[test]
fn test_owner_income_rules_and_estimated_tax() {
    let mut f = fixture();
    let family_id = f.family("Vargas");
    let person_id = f
        .registry
        .save(&mut Person::new("Ana", family_id, f.owner_type_id))
        .unwrap();

    let err = f
        .registry
        .save(&mut Owner::new(person_id, Decimal::ZERO))
        .unwrap_err();
    assert!(validation_fields(&err).contains(&"family_income".to_string()));

    let err = f
        .registry
        .save(&mut Owner::new(person_id, dec("10.125")))
        .unwrap_err();
    assert!(validation_fields(&err).contains(&"family_income".to_string()));

    let mut owner = Owner::new(person_id, dec("3000.00"));
    // Derived on save no matter what the caller puts in
    owner.estimated_tax = dec("1.00");
    f.registry.save(&mut owner).unwrap();
    // Flat 10% of the income, not the tax payment bands
    assert_eq!(owner.estimated_tax, dec("300.00"));

    owner.family_income = dec("1234.55");
    f.registry.save(&mut owner).unwrap();
    assert_eq!(owner.estimated_tax, dec("123.46"));

    let found = f.registry.owner_of_family(family_id).unwrap().unwrap();
    assert_eq!(found.id, owner.id);
}

#[test]
fn test_owner_person_keeps_owner_type() {
    let mut f = fixture();
    let (family_id, person_id) = f.family_with_owner("Flores", "1800.00");

    let mut person: Person = f.registry.get(person_id).unwrap();
    person.person_type_id = f.member_type_id;
    let err = f.registry.save(&mut person).unwrap_err();
    assert_eq!(validation_fields(&err), vec!["person_type_id"]);

    let stored: Person = f.registry.get(person_id).unwrap();
    assert_eq!(stored.person_type_id, f.owner_type_id);
    assert!(f.registry.owner_of_family(family_id).unwrap().is_some());

    // Without an Owner record the type is free to change
    let other_family = f.family("Huaman");
    let mut head = Person::new("Rosa", other_family, f.owner_type_id);
    f.registry.save(&mut head).unwrap();
    head.person_type_id = f.member_type_id;
    f.registry.save(&mut head).unwrap();
}

#[test]
fn test_person_type_rename_respects_owner_rules() {
    let mut f = fixture();
    let (family_id, _) = f.family_with_owner("Mendoza", "900.00");
    f.registry
        .save(&mut Person::new("Luis", family_id, f.member_type_id))
        .unwrap();

    // Would give the family a second owner-typed person
    let mut member: PersonType = f.registry.get(f.member_type_id).unwrap();
    member.description = "Propietario".to_string();
    let err = f.registry.save(&mut member).unwrap_err();
    assert_eq!(validation_fields(&err), vec!["description"]);

    // Owner records depend on the owner type
    let mut owner_type: PersonType = f.registry.get(f.owner_type_id).unwrap();
    owner_type.description = "Titular".to_string();
    let err = f.registry.save(&mut owner_type).unwrap_err();
    assert_eq!(validation_fields(&err), vec!["description"]);

    member.description = "Miembro".to_string();
    f.registry.save(&mut member).unwrap();
    owner_type.description = "Propietario".to_string();
    f.registry.save(&mut owner_type).unwrap();
    assert!(f.registry.owner_of_family(family_id).unwrap().is_some());
}

// ============================================================================
// HOUSES
// ============================================================================

#[test]
fn test_one_house_per_family() {
    let mut f = fixture();
    let first = f.dwelling("D1", 1, f.particular_id);
    let second = f.dwelling("D1", 2, f.particular_id);
    let family_id = f.family("Torres");

    f.registry
        .save(&mut House::new(first, family_id, dec("75.00")))
        .unwrap();
    let err = f
        .registry
        .save(&mut House::new(second, family_id, dec("60.00")))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["family_id"]);

    let house = f.registry.house_of_family(family_id).unwrap().unwrap();
    assert_eq!(house.dwelling_id, first);
}

#[test]
fn test_particular_dwelling_holds_one_house_without_sub_fields() {
    let mut f = fixture();
    let dwelling_id = f.dwelling("E1", 7, f.particular_id);
    let a = f.family("Rojas");
    let b = f.family("Castro");

    let err = f
        .registry
        .save(&mut House::unit(dwelling_id, a, dec("90.00"), "1", "A", "2", "3"))
        .unwrap_err();
    let fields = validation_fields(&err);
    for field in ["stair", "block", "floor", "door"] {
        assert!(fields.contains(&field.to_string()), "missing {}", field);
    }

    // Blank sub-fields count as empty
    let mut house = House::unit(dwelling_id, a, dec("90.00"), " ", "", " ", "");
    f.registry.save(&mut house).unwrap();
    assert_eq!(house.stair, None);

    let err = f
        .registry
        .save(&mut House::new(dwelling_id, b, dec("50.00")))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["dwelling_id"]);

    // Re-saving the existing house does not trip over itself
    house.area = dec("95.25");
    f.registry.save(&mut house).unwrap();
    assert_eq!(f.registry.houses_in_dwelling(dwelling_id).unwrap().len(), 1);
}

#[test]
fn test_block_of_units_requires_unique_unit_address() {
    let mut f = fixture();
    let dwelling_id = f.dwelling("F1", 3, f.bloque_id);
    let a = f.family("Chavez");
    let b = f.family("Diaz");
    let c = f.family("Salas");

    let err = f
        .registry
        .save(&mut House::new(dwelling_id, a, dec("70.00")))
        .unwrap_err();
    assert_eq!(
        validation_fields(&err),
        vec!["stair", "block", "floor", "door"]
    );

    let mut first = House::unit(dwelling_id, a, dec("70.00"), "1", "A", "2", "1");
    f.registry.save(&mut first).unwrap();
    f.registry
        .save(&mut House::unit(dwelling_id, b, dec("70.00"), "1", "A", "2", "2"))
        .unwrap();

    let err = f
        .registry
        .save(&mut House::unit(dwelling_id, c, dec("70.00"), "1", "A", "2", "1"))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["door"]);

    // Re-saving a unit with its own unchanged address is fine
    first.area = dec("72.50");
    f.registry.save(&mut first).unwrap();
    let stored: House = f.registry.get(first.id.unwrap()).unwrap();
    assert_eq!(stored.area, dec("72.50"));
    assert_eq!(stored.door.as_deref(), Some("1"));

    assert_eq!(f.registry.houses_in_dwelling(dwelling_id).unwrap().len(), 2);
}

#[test]
fn test_house_field_formats() {
    let mut f = fixture();
    let dwelling_id = f.dwelling("G1", 9, f.bloque_id);
    let family_id = f.family("Paredes");

    let err = f
        .registry
        .save(&mut House::unit(dwelling_id, family_id, Decimal::ZERO, "x", "A", "100", "1"))
        .unwrap_err();
    let fields = validation_fields(&err);
    assert!(fields.contains(&"area".to_string()));
    assert!(fields.contains(&"stair".to_string()));
    assert!(fields.contains(&"floor".to_string()));
    assert!(!fields.contains(&"door".to_string()));
}

#[test]
fn test_other_dwelling_types_have_no_unit_rules() {
    let mut f = fixture();
    let rural_id = f.registry.save(&mut DwellingType::new("Rural")).unwrap();
    let dwelling_id = f.dwelling("H1", 1, rural_id);
    let a = f.family("Lopez");
    let b = f.family("Perez");

    f.registry
        .save(&mut House::new(dwelling_id, a, dec("120.00")))
        .unwrap();
    f.registry
        .save(&mut House::new(dwelling_id, b, dec("110.00")))
        .unwrap();
}

#[test]
fn test_dwelling_type_change_must_suit_its_houses() {
    let mut f = fixture();
    let block = f.dwelling("H1", 4, f.bloque_id);
    let a = f.family("Quispe");
    let b = f.family("Mamani");
    f.registry
        .save(&mut House::unit(block, a, dec("60.00"), "1", "A", "1", "1"))
        .unwrap();
    f.registry
        .save(&mut House::unit(block, b, dec("60.00"), "1", "A", "1", "2"))
        .unwrap();

    let mut dwelling: Dwelling = f.registry.get(block).unwrap();
    dwelling.dwelling_type_id = f.particular_id;
    let err = f.registry.save(&mut dwelling).unwrap_err();
    assert_eq!(validation_fields(&err), vec!["dwelling_type_id"]);
    let current = f.registry.dwelling_type_of(block).unwrap().unwrap();
    assert_eq!(current.id, Some(f.bloque_id));

    // Single-unit house without sub-fields cannot move into a block
    let single = f.dwelling("H2", 5, f.particular_id);
    let c = f.family("Apaza");
    f.registry
        .save(&mut House::new(single, c, dec("80.00")))
        .unwrap();
    let mut dwelling: Dwelling = f.registry.get(single).unwrap();
    dwelling.dwelling_type_id = f.bloque_id;
    let err = f.registry.save(&mut dwelling).unwrap_err();
    assert_eq!(validation_fields(&err), vec!["dwelling_type_id"]);

    // An empty dwelling can switch freely
    let empty = f.dwelling("H3", 6, f.particular_id);
    let mut dwelling: Dwelling = f.registry.get(empty).unwrap();
    dwelling.dwelling_type_id = f.bloque_id;
    f.registry.save(&mut dwelling).unwrap();
}

#[test]
fn test_dwelling_type_rename_must_suit_its_houses() {
    let mut f = fixture();
    let rural_id = f.registry.save(&mut DwellingType::new("Rural")).unwrap();
    let dwelling_id = f.dwelling("J1", 8, rural_id);
    let a = f.family("Condori");
    let b = f.family("Ticona");
    f.registry
        .save(&mut House::unit(dwelling_id, a, dec("40.00"), "1", "B", "1", "1"))
        .unwrap();
    f.registry
        .save(&mut House::new(dwelling_id, b, dec("45.00")))
        .unwrap();

    let mut rural: DwellingType = f.registry.get(rural_id).unwrap();
    rural.description = "PARTICULAR".to_string();
    let err = f.registry.save(&mut rural).unwrap_err();
    assert_eq!(validation_fields(&err), vec!["description"]);

    rural.description = "bloquecasa".to_string();
    let err = f.registry.save(&mut rural).unwrap_err();
    assert_eq!(validation_fields(&err), vec!["description"]);

    rural.description = "Campo".to_string();
    f.registry.save(&mut rural).unwrap();
}

// ============================================================================
// TAX PAYMENTS
// ============================================================================

fn house_for_income(f: &mut Fixture, street: &str, income: &str) -> i64 {
    let dwelling_id = f.dwelling(street, 1, f.particular_id);
    let (family_id, _) = f.family_with_owner(street, income);
    f.registry
        .save(&mut House::new(dwelling_id, family_id, dec("80.00")))
        .unwrap()
}

#[test]
fn test_tax_payment_derives_category_and_amount() {
    let mut f = fixture();

    let cases = [
        ("T1", "999.99", TaxCategory::A, "100.00"),
        ("T2", "1000.00", TaxCategory::B, "150.00"),
        ("T3", "2499.99", TaxCategory::B, "375.00"),
        ("T4", "2500.00", TaxCategory::C, "500.00"),
    ];

    for (street, income, category, amount) in cases {
        let house_id = house_for_income(&mut f, street, income);
        let mut payment = TaxPayment::new(house_id, PaymentStatus::Owed);
        f.registry.save(&mut payment).unwrap();

        assert_eq!(payment.family_income, dec(income));
        assert_eq!(payment.category, Some(category), "income {}", income);
        assert_eq!(payment.amount, dec(amount), "income {}", income);

        let loaded: TaxPayment = f.registry.get(payment.id.unwrap()).unwrap();
        assert_eq!(loaded, payment);
    }
}

#[test]
fn test_tax_payment_recomputed_on_update() {
    let mut f = fixture();
    let house_id = house_for_income(&mut f, "U1", "800.00");
    let issued = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

    let mut payment = TaxPayment::new(house_id, PaymentStatus::InProcess).issued(issued);
    f.registry.save(&mut payment).unwrap();
    assert_eq!(payment.category, Some(TaxCategory::A));

    // Income rises, then the payment is saved again
    let family_id = f.registry.get::<House>(house_id).unwrap().family_id;
    let mut owner = f.registry.owner_of_family(family_id).unwrap().unwrap();
    owner.family_income = dec("2600.00");
    f.registry.save(&mut owner).unwrap();

    payment.payment_status = PaymentStatus::Paid;
    payment.amount = Decimal::ZERO;
    f.registry.save(&mut payment).unwrap();

    let loaded: TaxPayment = f.registry.get(payment.id.unwrap()).unwrap();
    assert_eq!(loaded.category, Some(TaxCategory::C));
    assert_eq!(loaded.amount, dec("520.00"));
    assert_eq!(loaded.payment_status, PaymentStatus::Paid);
    assert_eq!(loaded.issued_on, Some(issued));
    assert_eq!(
        f.registry.family_income_for_house(house_id).unwrap(),
        Some(dec("2600.00"))
    );
}

#[test]
fn test_one_tax_payment_per_house() {
    let mut f = fixture();
    let house_id = house_for_income(&mut f, "V1", "1200.00");

    f.registry
        .save(&mut TaxPayment::new(house_id, PaymentStatus::Owed))
        .unwrap();
    let err = f
        .registry
        .save(&mut TaxPayment::new(house_id, PaymentStatus::Owed))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["house_id"]);
}

#[test]
fn test_tax_payment_needs_an_owner() {
    let mut f = fixture();
    let dwelling_id = f.dwelling("W1", 1, f.particular_id);
    let family_id = f.family("SinDueno");
    let house_id = f
        .registry
        .save(&mut House::new(dwelling_id, family_id, dec("80.00")))
        .unwrap();

    let err = f
        .registry
        .save(&mut TaxPayment::new(house_id, PaymentStatus::Owed))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["house_id"]);

    let err = f
        .registry
        .save(&mut TaxPayment::new(999, PaymentStatus::Owed))
        .unwrap_err();
    assert_eq!(validation_fields(&err), vec!["house_id"]);
}

#[test]
fn test_tax_summary() {
    let mut f = fixture();
    for (street, income) in [("X1", "500.00"), ("X2", "700.00"), ("X3", "3000.00")] {
        let house_id = house_for_income(&mut f, street, income);
        f.registry
            .save(&mut TaxPayment::new(house_id, PaymentStatus::Paid))
            .unwrap();
    }

    let summary = f.registry.tax_summary().unwrap();
    assert_eq!(summary.len(), 3);
    assert_eq!(summary[0].category, TaxCategory::A);
    assert_eq!(summary[0].payments, 2);
    assert_eq!(summary[0].total_amount, dec("120.00"));
    assert_eq!(summary[1].payments, 0);
    assert_eq!(summary[1].total_amount, Decimal::ZERO);
    assert_eq!(summary[2].payments, 1);
    assert_eq!(summary[2].total_amount, dec("600.00"));
}

// ============================================================================
// CATALOGS
// ============================================================================

#[test]
fn test_seed_catalogs_is_idempotent() {
    let mut registry = Registry::open_in_memory().unwrap();

    assert_eq!(registry.seed_catalogs().unwrap(), 3);
    assert_eq!(registry.seed_catalogs().unwrap(), 0);

    let kinds: Vec<DwellingKind> = registry
        .list::<DwellingType>()
        .unwrap()
        .iter()
        .map(|t| t.kind())
        .collect();
    assert_eq!(kinds, vec![DwellingKind::Particular, DwellingKind::BlockOfUnits]);
    assert!(registry.list::<PersonType>().unwrap()[0].is_owner());
}

#[test]
fn test_seed_respects_existing_owner_label() {
    let mut registry = Registry::open_in_memory().unwrap();
    registry.save(&mut PersonType::new("Propietario")).unwrap();

    assert_eq!(registry.seed_catalogs().unwrap(), 2);
    assert_eq!(registry.count::<PersonType>().unwrap(), 1);
}
