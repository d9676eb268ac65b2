use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One row of the RDW `m9d7-ebf2` registration dataset.
///
/// The upstream API returns flat JSON objects whose values are all strings or
/// null, including the numeric columns (mass, seat count, BPM). Only the plate
/// is guaranteed present; it is the sole identity key, and duplicate plates
/// are kept as-is. Columns this struct does not name land in [`extra`] so the
/// free-text search can still reach them.
///
/// [`extra`]: VehicleRecord::extra
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub kenteken: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voertuigsoort: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merk: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handelsbenaming: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datum_tenaamstelling: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vervaldatum_apk: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eerste_kleur: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweede_kleur: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aantal_zitplaatsen: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zuinigheidslabel: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bruto_bpm: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub massa_ledig_voertuig: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laadvermogen: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cilinderinhoud: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_massa_trekken_ongeremd: Option<String>,
    /// Dataset columns without a named field above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Option<String>>,
}

impl VehicleRecord {
    /// Named dataset columns paired with their current values, in table order.
    pub fn named_fields(&self) -> [(&'static str, Option<&str>); 15] {
        [
            ("kenteken", Some(self.kenteken.as_str())),
            ("voertuigsoort", self.voertuigsoort.as_deref()),
            ("merk", self.merk.as_deref()),
            ("handelsbenaming", self.handelsbenaming.as_deref()),
            ("datum_tenaamstelling", self.datum_tenaamstelling.as_deref()),
            ("vervaldatum_apk", self.vervaldatum_apk.as_deref()),
            ("eerste_kleur", self.eerste_kleur.as_deref()),
            ("tweede_kleur", self.tweede_kleur.as_deref()),
            ("aantal_zitplaatsen", self.aantal_zitplaatsen.as_deref()),
            ("zuinigheidslabel", self.zuinigheidslabel.as_deref()),
            ("bruto_bpm", self.bruto_bpm.as_deref()),
            ("massa_ledig_voertuig", self.massa_ledig_voertuig.as_deref()),
            ("laadvermogen", self.laadvermogen.as_deref()),
            ("cilinderinhoud", self.cilinderinhoud.as_deref()),
            (
                "maximum_massa_trekken_ongeremd",
                self.maximum_massa_trekken_ongeremd.as_deref(),
            ),
        ]
    }

    /// Every present value on this record, named fields first, then extras.
    /// Absent and null columns are skipped rather than stringified.
    pub fn searchable_values(&self) -> impl Iterator<Item = &str> {
        self.named_fields()
            .into_iter()
            .filter_map(|(_, value)| value)
            .chain(self.extra.values().filter_map(|value| value.as_deref()))
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// The built-in demo dataset shown when the live fetch fails.
///
/// Callers inject this explicitly; nothing in the library reaches for it on
/// its own.
pub fn sample_records() -> Vec<VehicleRecord> {
    fn value(raw: &str) -> Option<String> {
        Some(raw.to_string())
    }

    vec![
        VehicleRecord {
            kenteken: "AB123Z".to_string(),
            voertuigsoort: value("Personenauto"),
            merk: value("VOLKSWAGEN"),
            handelsbenaming: value("GOLF"),
            datum_tenaamstelling: value("20190601"),
            vervaldatum_apk: value("20231215"),
            eerste_kleur: value("ZWART"),
            massa_ledig_voertuig: value("1321"),
            laadvermogen: value("579"),
            aantal_zitplaatsen: value("5"),
            zuinigheidslabel: value("C"),
            ..VehicleRecord::default()
        },
        VehicleRecord {
            kenteken: "XY456A".to_string(),
            voertuigsoort: value("Personenauto"),
            merk: value("TOYOTA"),
            handelsbenaming: value("YARIS"),
            datum_tenaamstelling: value("20200112"),
            vervaldatum_apk: value("20240815"),
            eerste_kleur: value("ROOD"),
            massa_ledig_voertuig: value("1080"),
            laadvermogen: value("500"),
            aantal_zitplaatsen: value("5"),
            zuinigheidslabel: value("B"),
            ..VehicleRecord::default()
        },
        VehicleRecord {
            kenteken: "CD789B".to_string(),
            voertuigsoort: value("Bedrijfsauto"),
            merk: value("MERCEDES-BENZ"),
            handelsbenaming: value("SPRINTER"),
            datum_tenaamstelling: value("20180725"),
            vervaldatum_apk: value("20230320"),
            eerste_kleur: value("WIT"),
            massa_ledig_voertuig: value("2450"),
            laadvermogen: value("1000"),
            aantal_zitplaatsen: value("3"),
            zuinigheidslabel: value("G"),
            ..VehicleRecord::default()
        },
        VehicleRecord {
            kenteken: "FG321H".to_string(),
            voertuigsoort: value("Personenauto"),
            merk: value("BMW"),
            handelsbenaming: value("3-SERIE"),
            datum_tenaamstelling: value("20210415"),
            vervaldatum_apk: value("20240630"),
            eerste_kleur: value("BLAUW"),
            massa_ledig_voertuig: value("1495"),
            laadvermogen: value("525"),
            aantal_zitplaatsen: value("5"),
            zuinigheidslabel: value("D"),
            ..VehicleRecord::default()
        },
        VehicleRecord {
            kenteken: "JK654L".to_string(),
            voertuigsoort: value("Motorfiets"),
            merk: value("HONDA"),
            handelsbenaming: value("CBR"),
            datum_tenaamstelling: value("20190812"),
            vervaldatum_apk: value("20231030"),
            eerste_kleur: value("ZWART"),
            massa_ledig_voertuig: value("202"),
            laadvermogen: value("180"),
            aantal_zitplaatsen: value("2"),
            zuinigheidslabel: value("n.v.t."),
            ..VehicleRecord::default()
        },
    ]
}
