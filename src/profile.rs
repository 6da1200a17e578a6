//! Body metrics derived from a user profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NutritionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Daily activity, used to scale resting energy expenditure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl FromStr for Gender {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(NutritionError::InvalidProfile(format!(
                "unknown gender '{other}'"
            ))),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "veryactive" => Ok(ActivityLevel::VeryActive),
            _ => Err(NutritionError::InvalidProfile(format!(
                "unknown activity level '{}'",
                s.trim()
            ))),
        }
    }
}

/// Personal details needed for energy estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
}

/// Derived metrics for a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetrics {
    pub bmi: f64,
    pub bmr: f64,
    pub daily_calories: u32,
}

impl Profile {
    /// Reject values outside the ranges a profile form accepts
    pub fn validate(&self) -> Result<(), NutritionError> {
        if !(13..=120).contains(&self.age) {
            return Err(NutritionError::InvalidProfile(format!(
                "age must be between 13 and 120, got {}",
                self.age
            )));
        }
        if !(50.0..=250.0).contains(&self.height_cm) {
            return Err(NutritionError::InvalidProfile(format!(
                "height must be between 50 and 250 cm, got {}",
                self.height_cm
            )));
        }
        if !(30.0..=300.0).contains(&self.weight_kg) {
            return Err(NutritionError::InvalidProfile(format!(
                "weight must be between 30 and 300 kg, got {}",
                self.weight_kg
            )));
        }
        Ok(())
    }

    /// Body mass index in kg/m²
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }

    /// Basal metabolic rate (Mifflin-St Jeor) in kcal/day
    pub fn bmr(&self) -> f64 {
        let base = 10.0 * self.weight_kg + 6.25 * self.height_cm - 5.0 * f64::from(self.age);
        match self.gender {
            Gender::Male => base + 5.0,
            Gender::Female | Gender::Other => base - 161.0,
        }
    }

    /// Activity-adjusted energy needs in kcal/day
    pub fn daily_calories(&self) -> u32 {
        (self.bmr() * self.activity_level.multiplier()).round().max(0.0) as u32
    }

    /// Validate the profile and compute all metrics at once
    pub fn metrics(&self) -> Result<ProfileMetrics, NutritionError> {
        self.validate()?;
        Ok(ProfileMetrics {
            bmi: self.bmi(),
            bmr: self.bmr(),
            daily_calories: self.daily_calories(),
        })
    }
}

impl fmt::Display for ProfileMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BMI: {:.1} kg/m²", self.bmi)?;
        writeln!(f, "BMR: {:.0} kcal", self.bmr)?;
        write!(f, "Daily Calories: {} kcal", self.daily_calories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_profile() -> Profile {
        Profile {
            age: 30,
            gender: Gender::Male,
            height_cm: 170.0,
            weight_kg: 70.0,
            activity_level: ActivityLevel::Moderate,
        }
    }

    #[test]
    fn test_bmi() {
        let bmi = default_profile().bmi();
        assert!((bmi - 24.221).abs() < 0.001, "{bmi}");
    }

    #[test]
    fn test_bmr_male_and_female() {
        let mut profile = default_profile();
        // 700 + 1062.5 - 150 + 5
        assert_eq!(profile.bmr(), 1617.5);

        profile.gender = Gender::Female;
        assert_eq!(profile.bmr(), 1451.5);
    }

    #[test]
    fn test_daily_calories() {
        let mut profile = default_profile();
        // 1617.5 * 1.55 = 2507.125
        assert_eq!(profile.daily_calories(), 2507);

        profile.activity_level = ActivityLevel::Sedentary;
        assert_eq!(profile.daily_calories(), 1941);
    }

    #[test]
    fn test_validate_ranges() {
        let mut profile = default_profile();
        assert!(profile.validate().is_ok());

        profile.age = 12;
        assert!(matches!(
            profile.validate(),
            Err(NutritionError::InvalidProfile(_))
        ));

        profile.age = 30;
        profile.height_cm = 251.0;
        assert!(profile.validate().is_err());

        profile.height_cm = 170.0;
        profile.weight_kg = 29.5;
        assert!(profile.metrics().is_err());
    }

    #[test]
    fn test_parse_activity_level() {
        assert_eq!(
            "veryActive".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            "very-active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!("Light".parse::<ActivityLevel>().unwrap(), ActivityLevel::Light);
        assert!("couch".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_parse_gender() {
        assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_metrics_display() {
        let metrics = default_profile().metrics().unwrap();
        let text = metrics.to_string();
        assert!(text.contains("BMI: 24.2 kg/m²"));
        assert!(text.contains("Daily Calories: 2507 kcal"));
    }
}
