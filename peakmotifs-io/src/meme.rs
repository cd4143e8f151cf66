use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

///
/// One motif from a MEME run: its name, discovery statistics, and the
/// position-weight matrix (per-position letter probabilities).
///
#[derive(Clone, Debug, PartialEq)]
pub struct MemeMotif {
    pub name: String,
    pub e_value: f64,
    pub sites: u32,
    pub pwm: Vec<BTreeMap<char, f64>>,
}

///
/// Everything we need from a `meme.xml`: the training-set letter
/// background frequencies and the discovered motifs.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemeData {
    pub letter_frequencies: BTreeMap<char, f64>,
    pub motifs: Vec<MemeMotif>,
}

pub fn parse_meme_xml(path: &Path) -> Result<MemeData> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read meme xml: {:?}", path))?;
    parse_meme_str(&xml).with_context(|| format!("Failed to parse meme xml: {:?}", path))
}

fn attribute(element: &BytesStart, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

pub fn parse_meme_str(xml: &str) -> Result<MemeData> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut data = MemeData::default();

    let mut in_letter_frequencies = false;
    let mut in_probabilities = false;
    let mut current_motif: Option<MemeMotif> = None;
    let mut current_letter: Option<char> = None;
    let mut value_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"letter_frequencies" => in_letter_frequencies = true,
                b"probabilities" => in_probabilities = true,
                b"motif" => {
                    let name = attribute(&e, b"name")
                        .ok_or_else(|| anyhow::anyhow!("motif element without name"))?;
                    let e_value = attribute(&e, b"e_value")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(f64::INFINITY);
                    let sites = attribute(&e, b"sites")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0);
                    current_motif = Some(MemeMotif {
                        name,
                        e_value,
                        sites,
                        pwm: Vec::new(),
                    });
                }
                b"alphabet_array" => {
                    if in_probabilities {
                        if let Some(motif) = current_motif.as_mut() {
                            motif.pwm.push(BTreeMap::new());
                        }
                    }
                }
                b"value" => {
                    if in_letter_frequencies || in_probabilities {
                        current_letter = attribute(&e, b"letter_id")
                            .and_then(|id| id.chars().next());
                        value_text.clear();
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if current_letter.is_some() {
                    value_text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"letter_frequencies" => in_letter_frequencies = false,
                b"probabilities" => in_probabilities = false,
                b"motif" => {
                    if let Some(motif) = current_motif.take() {
                        data.motifs.push(motif);
                    }
                }
                b"value" => {
                    if let Some(letter) = current_letter.take() {
                        let value: f64 = value_text.trim().parse().with_context(|| {
                            format!("bad probability for letter {}: {:?}", letter, value_text)
                        })?;
                        if in_letter_frequencies {
                            data.letter_frequencies.insert(letter, value);
                        } else if in_probabilities {
                            if let Some(row) = current_motif
                                .as_mut()
                                .and_then(|motif| motif.pwm.last_mut())
                            {
                                row.insert(letter, value);
                            }
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => bail!("XML parsing error: {}", e),
            _ => {}
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    const MEME_XML: &str = r#"<?xml version="1.0"?>
<MEME version="5.1.0">
  <training_set primary_sequences="top500.center.seqs" primary_count="500">
    <alphabet name="DNA" like="dna">
      <letter id="A" symbol="A" name="Adenine"/>
      <letter id="C" symbol="C" name="Cytosine"/>
      <letter id="G" symbol="G" name="Guanine"/>
      <letter id="T" symbol="T" name="Thymine"/>
    </alphabet>
    <letter_frequencies>
      <alphabet_array>
        <value letter_id="A">0.28</value>
        <value letter_id="C">0.22</value>
        <value letter_id="G">0.22</value>
        <value letter_id="T">0.28</value>
      </alphabet_array>
    </letter_frequencies>
  </training_set>
  <motifs>
    <motif id="motif_1" name="CCGGAA" width="6" sites="123" e_value="3.5e-044">
      <scores>
        <alphabet_matrix>
          <alphabet_array>
            <value letter_id="A">-100</value>
            <value letter_id="C">200</value>
            <value letter_id="G">-300</value>
            <value letter_id="T">-400</value>
          </alphabet_array>
        </alphabet_matrix>
      </scores>
      <probabilities>
        <alphabet_matrix>
          <alphabet_array>
            <value letter_id="A">0.1</value>
            <value letter_id="C">0.7</value>
            <value letter_id="G">0.1</value>
            <value letter_id="T">0.1</value>
          </alphabet_array>
          <alphabet_array>
            <value letter_id="A">0.05</value>
            <value letter_id="C">0.85</value>
            <value letter_id="G">0.05</value>
            <value letter_id="T">0.05</value>
          </alphabet_array>
        </alphabet_matrix>
      </probabilities>
    </motif>
  </motifs>
</MEME>"#;

    #[test]
    fn test_parse_meme_xml() {
        let data = parse_meme_str(MEME_XML).unwrap();

        assert_eq!(data.letter_frequencies[&'A'], 0.28);
        assert_eq!(data.letter_frequencies[&'C'], 0.22);

        assert_eq!(data.motifs.len(), 1);
        let motif = &data.motifs[0];
        assert_eq!(motif.name, "CCGGAA");
        assert_eq!(motif.e_value, 3.5e-44);
        assert_eq!(motif.sites, 123);
        // the <scores> matrix must not leak into the pwm
        assert_eq!(motif.pwm.len(), 2);
        assert_eq!(motif.pwm[0][&'C'], 0.7);
        assert_eq!(motif.pwm[1][&'C'], 0.85);
    }
}
