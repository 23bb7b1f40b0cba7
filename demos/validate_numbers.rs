use nip24::number::*;

fn main() {
    // Offline identifier validation (no network required)
    println!("=== Identifier Validation ===\n");

    let samples = [
        (Family::Nip, "717-164-20-51"),
        (Family::Nip, "7171642052"),  // wrong check digit
        (Family::Regon, "192598184"),
        (Family::Regon, "12345678500002"),
        (Family::Krs, "12345"),       // padded to 10 digits
        (Family::EuVat, "PL 717-164-20-51"),
        (Family::EuVat, "DE012345678"), // leading zero not allowed
        (Family::Iban, "PL49 1540 0004 6458 4397 1982 6658"),
    ];

    for (family, raw) in &samples {
        match Identifier::parse(*family, raw) {
            Ok(id) => println!("  {family:<6} {raw:<36} => valid ({})", id.value()),
            Err(e) => println!("  {family:<6} {raw:<36} => INVALID: {e}"),
        }
    }

    // Domestic account numbers without country prefix
    println!("\n=== Bank Accounts ===\n");

    for account in ["49154000046458439719826658", "49154000046458439719826659"] {
        match iban::normalize_account(account) {
            Some(iban) => println!("  {account} => {iban}"),
            None => println!("  {account} => INVALID"),
        }
    }
}
