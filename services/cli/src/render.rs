use rdw_verkenner::dashboard::DataSource;
use rdw_verkenner::vehicles::dates;
use rdw_verkenner::vehicles::{DashboardStats, VehicleRecord};

/// Prints the stat block and the filtered registration table.
pub fn dashboard(
    stats: &DashboardStats,
    selected: &[&VehicleRecord],
    source: Option<DataSource>,
    window_days: i64,
) {
    println!("Open RDW voertuigverkenner");
    if let Some(source) = source {
        println!("Bron: {}", source.label());
    }

    println!();
    println!(
        "Records getoond: {} ({} geladen)",
        stats.records_shown, stats.total_loaded
    );
    match &stats.newest {
        Some(newest) => println!(
            "Laatste tenaamstelling: {} ({} · {})",
            dates::format_date(newest.date),
            newest.kenteken,
            newest.merk.as_deref().unwrap_or("Onbekend")
        ),
        None => println!("Laatste tenaamstelling: {}", dates::NOT_APPLICABLE),
    }
    match stats.average_age_years {
        Some(age) => println!("Gem. registratieleeftijd: {age:.1} jaar"),
        None => println!("Gem. registratieleeftijd: {}", dates::NOT_APPLICABLE),
    }
    println!("APK verloopt <={window_days}d: {}", stats.expiring_soon);

    println!();
    print_row(
        "Kenteken",
        "Merk",
        "Model",
        "Type",
        "Tenaamstelling",
        "APK vervalt",
    );
    for vehicle in selected {
        print_row(
            &vehicle.kenteken,
            vehicle.merk.as_deref().unwrap_or("-"),
            vehicle.handelsbenaming.as_deref().unwrap_or("-"),
            vehicle.voertuigsoort.as_deref().unwrap_or("-"),
            &dates::format_raw(vehicle.datum_tenaamstelling.as_deref()),
            &dates::format_raw(vehicle.vervaldatum_apk.as_deref()),
        );
    }
}

fn print_row(plate: &str, brand: &str, model: &str, kind: &str, registered: &str, apk: &str) {
    println!("{plate:<10} {brand:<16} {model:<18} {kind:<14} {registered:<14} {apk:<14}");
}

/// Prints the detail card for one vehicle, every named column included.
pub fn vehicle_details(vehicle: &VehicleRecord) {
    println!("Details voor {}", vehicle.kenteken);
    for (column, value) in vehicle.named_fields() {
        let shown = match column {
            "datum_tenaamstelling" | "vervaldatum_apk" => dates::format_raw(value),
            _ => value.unwrap_or(dates::NOT_APPLICABLE).to_string(),
        };
        println!("  {:<32} {}", field_label(column), shown);
    }

    if !vehicle.extra.is_empty() {
        println!("  Overige velden");
        for (column, value) in &vehicle.extra {
            println!(
                "    {:<30} {}",
                column,
                value.as_deref().unwrap_or(dates::NOT_APPLICABLE)
            );
        }
    }
}

pub fn dashboard_json(
    stats: &DashboardStats,
    selected: &[&VehicleRecord],
) -> Result<(), serde_json::Error> {
    let payload = serde_json::json!({
        "stats": stats,
        "vehicles": selected,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub fn vehicle_json(vehicle: &VehicleRecord) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(vehicle)?);
    Ok(())
}

fn field_label(column: &str) -> &str {
    match column {
        "kenteken" => "Kenteken",
        "voertuigsoort" => "Voertuigsoort",
        "merk" => "Merk",
        "handelsbenaming" => "Handelsbenaming",
        "datum_tenaamstelling" => "Datum tenaamstelling",
        "vervaldatum_apk" => "Vervaldatum APK",
        "eerste_kleur" => "Eerste kleur",
        "tweede_kleur" => "Tweede kleur",
        "aantal_zitplaatsen" => "Aantal zitplaatsen",
        "zuinigheidslabel" => "Zuinigheidslabel",
        "bruto_bpm" => "Bruto BPM",
        "massa_ledig_voertuig" => "Massa ledig voertuig",
        "laadvermogen" => "Laadvermogen",
        "cilinderinhoud" => "Cilinderinhoud",
        "maximum_massa_trekken_ongeremd" => "Max. trekgewicht ongeremd",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_column_has_a_dutch_label() {
        let record = VehicleRecord::default();
        for (column, _) in record.named_fields() {
            assert_ne!(field_label(column), column, "missing label for {column}");
        }
    }
}
