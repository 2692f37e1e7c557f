use std::fmt;

/// One row of the kill-list screen, as recovered from OCR text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KillRecord {
    pub timestamp: String,
    pub name: String,
    pub faction: String,
    pub weapon: String,
}

impl fmt::Display for KillRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {} | Name: {} | Faction: {} | Weapon: {}",
            self.timestamp, self.name, self.faction, self.weapon
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let record = KillRecord {
            timestamp: "12:34".to_string(),
            name: "Rambo".to_string(),
            faction: "SCAV".to_string(),
            weapon: "AK-74 N".to_string(),
        };
        assert_eq!(
            record.to_string(),
            "Time: 12:34 | Name: Rambo | Faction: SCAV | Weapon: AK-74 N"
        );
    }

    #[test]
    fn test_display_with_empty_weapon() {
        let record = KillRecord {
            timestamp: "Customs".to_string(),
            name: "PMC".to_string(),
            faction: "AK-74".to_string(),
            weapon: String::new(),
        };
        assert_eq!(
            record.to_string(),
            "Time: Customs | Name: PMC | Faction: AK-74 | Weapon: "
        );
    }
}
