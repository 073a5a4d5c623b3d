//! Provisioned credential table

use crate::models::User;

/// Number of staff accounts provisioned after the administrator
pub const SEED_STAFF_COUNT: usize = 152;

const SEED_JOIN_DATE: &str = "2024-01-15";

const GENERATED_DEPARTMENTS: [&str; 6] =
    ["Sales", "Marketing", "HR", "IT", "Finance", "Operations"];

const NAMED_STAFF: [(&str, &str, &str, &str); 20] = [
    ("0001", "Joseph Preistley", "Sales", "Staff"),
    ("0002", "panda Reyez", "Marketing", "Staff"),
    ("0003", "Abol Wangjanim", "HR", "Staff"),
    ("0004", "Erga Shaka", "IT", "Developer"),
    ("0005", "Adinda Prinsloo", "Finance", "Staff"),
    ("0006", "Gracella Blanche", "Operations", "Staff"),
    ("0007", "Valco Blanche", "Operations", "Staff"),
    ("0008", "Oshee Khair", "Sales", "Staff"),
    ("0009", "Naomi Reksa Hakanatomi", "Marketing", "Staff"),
    ("0010", "Aurelya L. Keenan", "HR", "Staff"),
    ("0011", "Arkahans Ruizcarrillo", "IT", "Staff"),
    ("0012", "Binu Twuokai GSTR", "Finance", "Staff"),
    ("0013", "Jibil Dossman", "Operations", "Staff"),
    ("0014", "Taka Nome", "Sales", "Staff"),
    ("0015", "Winther Sham Weasley", "Marketing", "Staff"),
    ("0016", "Kardus Smith", "HR", "Staff"),
    ("0017", "Hasian Nalagu", "IT", "Staff"),
    ("0018", "Komang Lia", "Finance", "Staff"),
    ("0019", "Mosawo Koiiro", "Operations", "Staff"),
    ("0020", "Kalvin Smoke", "Sales", "Staff"),
];

fn staff(id: &str, name: &str, department: &str, position: &str) -> User {
    User {
        department: Some(department.to_string()),
        position: Some(position.to_string()),
        join_date: Some(SEED_JOIN_DATE.to_string()),
        ..User::new(id, name, id)
    }
}

/// Administrator followed by staff `0001`..`0152`.
///
/// Staff usernames and passwords equal their ids.
pub fn seed_users() -> Vec<User> {
    let admin = User {
        id: "admin".to_string(),
        name: "Administrator".to_string(),
        username: "admin".to_string(),
        password: "admin123".to_string(),
        is_admin: true,
        is_active: true,
        department: Some("IT".to_string()),
        position: Some("Administrator".to_string()),
        join_date: Some("2024-01-01".to_string()),
    };

    let named = NAMED_STAFF
        .iter()
        .map(|(id, name, department, position)| staff(id, name, department, position));

    let generated = (NAMED_STAFF.len() + 1..=SEED_STAFF_COUNT).enumerate().map(|(i, n)| {
        let id = format!("{n:04}");
        let name = format!("User {id}");
        staff(&id, &name, GENERATED_DEPARTMENTS[i % GENERATED_DEPARTMENTS.len()], "Staff")
    });

    std::iter::once(admin).chain(named).chain(generated).collect()
}
