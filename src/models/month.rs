use crate::error::Error;

/// Calendar month of a ledger entry.
///
/// Variants are declared in calendar order, so the derived `Ord` is display
/// order. Labels are the Portuguese names shown in the ledger and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn all() -> &'static [Month; 12] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::January => "Janeiro",
            Self::February => "Fevereiro",
            Self::March => "Março",
            Self::April => "Abril",
            Self::May => "Maio",
            Self::June => "Junho",
            Self::July => "Julho",
            Self::August => "Agosto",
            Self::September => "Setembro",
            Self::October => "Outubro",
            Self::November => "Novembro",
            Self::December => "Dezembro",
        }
    }

    /// 1-based month number.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn from_number(n: u32) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::all().get(i as usize))
            .copied()
    }

    /// Accepts Portuguese or English names and three-letter abbreviations,
    /// with or without accents and in any case, or a number from 1 to 12.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let folded: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == 'ç' { 'c' } else { c })
            .collect();

        if let Ok(n) = folded.parse::<u32>() {
            return Self::from_number(n).ok_or_else(|| Error::UnknownMonth(s.to_string()));
        }

        let month = match folded.as_str() {
            "janeiro" | "january" | "jan" => Self::January,
            "fevereiro" | "february" | "fev" | "feb" => Self::February,
            "marco" | "march" | "mar" => Self::March,
            "abril" | "april" | "abr" | "apr" => Self::April,
            "maio" | "may" | "mai" => Self::May,
            "junho" | "june" | "jun" => Self::June,
            "julho" | "july" | "jul" => Self::July,
            "agosto" | "august" | "ago" | "aug" => Self::August,
            "setembro" | "september" | "set" | "sep" => Self::September,
            "outubro" | "october" | "out" | "oct" => Self::October,
            "novembro" | "november" | "nov" => Self::November,
            "dezembro" | "december" | "dez" | "dec" => Self::December,
            _ => return Err(Error::UnknownMonth(s.to_string())),
        };
        Ok(month)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
