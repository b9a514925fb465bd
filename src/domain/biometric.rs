use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{require_text, DomainError, DomainResult};

/// Size in bytes of a generated payload before hex encoding
const PAYLOAD_BYTES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricType {
    Fingerprint,
    Face,
    Voice,
}

impl BiometricType {
    pub const ALL: [BiometricType; 3] = [
        BiometricType::Fingerprint,
        BiometricType::Face,
        BiometricType::Voice,
    ];
}

/// Input for a manually submitted biometric reading
#[derive(Debug, Clone, Deserialize)]
pub struct NewBiometricRecord {
    pub device_id: String,
    pub biometric_type: BiometricType,
    pub data_quality: u8,
    pub payload: String,
}

/// A reading pushed by a biometric device
#[derive(Debug, Clone, Serialize)]
pub struct BiometricRecord {
    pub id: Uuid,
    pub device_id: String,
    pub biometric_type: BiometricType,
    /// Capture quality in 0..=100
    pub data_quality: u8,
    pub payload: String,
    pub generated_at: DateTime<Utc>,
}

impl BiometricRecord {
    pub fn new(input: NewBiometricRecord) -> DomainResult<Self> {
        if input.data_quality > 100 {
            return Err(DomainError::validation("Data quality must be between 0 and 100"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            device_id: require_text(&input.device_id, "Device id")?,
            biometric_type: input.biometric_type,
            data_quality: input.data_quality,
            payload: input.payload,
            generated_at: Utc::now(),
        })
    }

    /// A random reading for the given device
    pub fn dummy<R: Rng>(rng: &mut R, device_id: &str) -> Self {
        let mut payload = [0u8; PAYLOAD_BYTES];
        rng.fill(&mut payload);

        Self {
            id: Uuid::new_v4(),
            device_id: device_id.to_string(),
            biometric_type: BiometricType::ALL[rng.gen_range(0..BiometricType::ALL.len())],
            data_quality: rng.gen_range(0..=100),
            payload: hex::encode(payload),
            generated_at: Utc::now(),
        }
    }
}

/// Device identifier used by generated readings
pub fn device_name(index: usize) -> String {
    format!("device-{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dummy_record_is_well_formed() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = BiometricRecord::dummy(&mut rng, "device-1");

        assert_eq!(record.device_id, "device-1");
        assert!(record.data_quality <= 100);
        assert_eq!(record.payload.len(), PAYLOAD_BYTES * 2);
        assert!(record.payload.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn create_from_input() {
        let record = BiometricRecord::new(NewBiometricRecord {
            device_id: "device-1".into(),
            biometric_type: BiometricType::Face,
            data_quality: 90,
            payload: "abc".into(),
        })
        .unwrap();

        assert_eq!(record.device_id, "device-1");
        assert_eq!(record.biometric_type, BiometricType::Face);
        assert_eq!(record.data_quality, 90);
        assert_eq!(record.payload, "abc");
    }

    #[test]
    fn quality_above_hundred_fails() {
        let result = BiometricRecord::new(NewBiometricRecord {
            device_id: "device-1".into(),
            biometric_type: BiometricType::Voice,
            data_quality: 101,
            payload: String::new(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn blank_device_fails() {
        let result = BiometricRecord::new(NewBiometricRecord {
            device_id: " ".into(),
            biometric_type: BiometricType::Voice,
            data_quality: 50,
            payload: String::new(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn device_names_are_one_based() {
        assert_eq!(device_name(0), "device-1");
        assert_eq!(device_name(4), "device-5");
    }
}
