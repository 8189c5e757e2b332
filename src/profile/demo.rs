//! 演示数据

use super::ProfileRecord;

/// 演示模式下预填充的固定档案
pub fn demo_profile() -> ProfileRecord {
    ProfileRecord {
        name: "Jisoo Jang".to_string(),
        date_of_birth: "2001-09-14".to_string(),
        gender: "Female".to_string(),
        phone: "604-555-0192".to_string(),
        email: "jisoo.jang@example.com".to_string(),
        profile_image_uri: String::new(),
        address: "1234 Main St".to_string(),
        postal_code: "V5K 0A1".to_string(),
        province: "British Columbia".to_string(),
        citizenship_status: "Permanent Resident".to_string(),
        household_size: "3".to_string(),
        family_composition: "Self, parent, sibling".to_string(),
        annual_family_net_income: "$48,000".to_string(),
        guardian_name: "Min Jang".to_string(),
        guardian_phone: "604-555-0177".to_string(),
        guardian_email: "min.jang@example.com".to_string(),
        highest_education: "Trade School".to_string(),
        high_school_name: "Vancouver Technical Secondary".to_string(),
        graduation_date: "2019-06-20".to_string(),
        trade_school_name: "BCIT".to_string(),
        trade_program_name: "Electrical Foundation".to_string(),
        trade_graduation_date: "2024-05-15".to_string(),
        trade: "Electrician".to_string(),
        apprenticeship_level: "Level 2".to_string(),
    }
}
