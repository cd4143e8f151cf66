use std::collections::{BTreeMap, HashMap};

use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use peakmotifs_io::MemeData;

use crate::scores::{OccurrenceTable, compare_proportions, z_score_to_p_value};

///
/// The final report: one entry per discovered motif plus the training-set
/// letter background frequencies.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MotifData {
    pub motifs: Vec<OutputMotif>,
    pub background_frequencies: BTreeMap<char, f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputMotif {
    pub name: String,
    pub pwm: Vec<BTreeMap<char, f64>>,
    /// MEME discovery E-value.
    pub e_value: f64,
    /// Number of contributing sites MEME reported for this motif.
    pub sites: u32,
    /// Number of sequences in the original (cleaned) peak set.
    pub original_peaks: u32,
    /// Distinct original-peak sequences with at least one occurrence.
    pub original_peaks_occurrences: u32,
    /// Occurrence ratio over the lesser-ranked peak-center set.
    pub lesser_peaks_occurrences_ratio: f64,
    pub flank_control_data: MotifControlData,
    pub shuffled_control_data: MotifControlData,
    /// Normalized distribution of occurrence distances from summits.
    pub peak_centrality: BTreeMap<i64, f64>,
}

/// Comparison of the lesser-peak occurrence ratio against one control set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MotifControlData {
    pub occurrences_ratio: f64,
    pub z_score: f64,
    pub p_value: f64,
}

impl MotifControlData {
    fn comparing(baseline: &OccurrenceTable, control: &OccurrenceTable) -> Self {
        let z_score = compare_proportions(baseline, control);
        MotifControlData {
            occurrences_ratio: control.ratio(),
            z_score,
            p_value: z_score_to_p_value(z_score),
        }
    }
}

///
/// Combine parsed MEME output, the four occurrence tables, and the
/// centrality distributions into the report structure. Statistics per
/// motif are independent, so motifs are evaluated in parallel.
///
pub fn assemble_report(
    meme: &MemeData,
    original_peaks: u32,
    original: &HashMap<String, OccurrenceTable>,
    lesser: &HashMap<String, OccurrenceTable>,
    flank: &HashMap<String, OccurrenceTable>,
    shuffled: &HashMap<String, OccurrenceTable>,
    centrality: &HashMap<String, BTreeMap<i64, f64>>,
) -> MotifData {
    let table = |tables: &HashMap<String, OccurrenceTable>, name: &str| {
        tables.get(name).copied().unwrap_or_else(|| {
            warn!("motif {} missing from a scan result set", name);
            OccurrenceTable::default()
        })
    };

    let motifs = meme
        .motifs
        .par_iter()
        .map(|motif| {
            let baseline = table(lesser, &motif.name);

            OutputMotif {
                name: motif.name.clone(),
                pwm: motif.pwm.clone(),
                e_value: motif.e_value,
                sites: motif.sites,
                original_peaks,
                original_peaks_occurrences: table(original, &motif.name).sequences_with_hit,
                lesser_peaks_occurrences_ratio: baseline.ratio(),
                flank_control_data: MotifControlData::comparing(
                    &baseline,
                    &table(flank, &motif.name),
                ),
                shuffled_control_data: MotifControlData::comparing(
                    &baseline,
                    &table(shuffled, &motif.name),
                ),
                peak_centrality: centrality.get(&motif.name).cloned().unwrap_or_default(),
            }
        })
        .collect();

    MotifData {
        motifs,
        background_frequencies: meme.letter_frequencies.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use peakmotifs_io::MemeMotif;
    use pretty_assertions::assert_eq;

    fn meme_fixture() -> MemeData {
        MemeData {
            letter_frequencies: BTreeMap::from([('A', 0.3), ('C', 0.2), ('G', 0.2), ('T', 0.3)]),
            motifs: vec![MemeMotif {
                name: "CCGGAA".to_string(),
                e_value: 3.5e-44,
                sites: 123,
                pwm: vec![BTreeMap::from([
                    ('A', 0.1),
                    ('C', 0.7),
                    ('G', 0.1),
                    ('T', 0.1),
                ])],
            }],
        }
    }

    fn tables(hit: u32, total: u32) -> HashMap<String, OccurrenceTable> {
        HashMap::from([("CCGGAA".to_string(), OccurrenceTable::new(hit, total))])
    }

    #[test]
    fn test_assemble_report() {
        let meme = meme_fixture();
        let centrality = HashMap::from([(
            "CCGGAA".to_string(),
            BTreeMap::from([(-5, 0.25), (0, 0.75)]),
        )]);

        let report = assemble_report(
            &meme,
            1500,
            &tables(900, 1500),
            &tables(250, 500),
            &tables(100, 500),
            &tables(50, 500),
            &centrality,
        );

        assert_eq!(report.motifs.len(), 1);
        let motif = &report.motifs[0];
        assert_eq!(motif.original_peaks, 1500);
        assert_eq!(motif.original_peaks_occurrences, 900);
        assert_eq!(motif.lesser_peaks_occurrences_ratio, 0.5);
        assert_eq!(motif.flank_control_data.occurrences_ratio, 0.2);
        assert!(motif.flank_control_data.z_score > 0.0);
        assert!(motif.flank_control_data.p_value <= 0.5);
        assert!(motif.shuffled_control_data.z_score > motif.flank_control_data.z_score);
        assert_eq!(report.background_frequencies[&'A'], 0.3);
    }

    #[test]
    fn test_report_serializes_with_expected_field_names() {
        let meme = meme_fixture();
        let report = assemble_report(
            &meme,
            1500,
            &tables(900, 1500),
            &tables(250, 500),
            &tables(100, 500),
            &tables(50, 500),
            &HashMap::new(),
        );

        let value = serde_json::to_value(&report).unwrap();
        let motif = &value["motifs"][0];
        assert_eq!(motif["name"], "CCGGAA");
        assert_eq!(motif["e_value"], 3.5e-44);
        assert_eq!(motif["original_peaks"], 1500);
        assert!(motif["flank_control_data"]["z_score"].is_f64());
        assert!(motif["shuffled_control_data"]["p_value"].is_f64());
        assert_eq!(motif["pwm"][0]["C"], 0.7);
        assert_eq!(value["background_frequencies"]["A"], 0.3);
    }

    #[test]
    fn test_missing_control_set_degrades_to_neutral_values() {
        let meme = meme_fixture();
        let report = assemble_report(
            &meme,
            1500,
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );

        let motif = &report.motifs[0];
        assert_eq!(motif.original_peaks_occurrences, 0);
        assert_eq!(motif.lesser_peaks_occurrences_ratio, 0.0);
        assert_eq!(motif.flank_control_data.z_score, 0.0);
        assert_eq!(motif.flank_control_data.p_value, 0.5);
        assert!(motif.peak_centrality.is_empty());
    }
}
