//! 档案数据模型
//!
//! 定义 ProfileRecord, ProfileField, ProfilePatch 等数据结构

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════
// 字段分组
// ═══════════════════════════════════════════════════════════════════

/// 字段逻辑分组（仅用于展示，记录本身是扁平结构）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Identity,
    Residence,
    Household,
    Guardian,
    Education,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 5] = [
        FieldGroup::Identity,
        FieldGroup::Residence,
        FieldGroup::Household,
        FieldGroup::Guardian,
        FieldGroup::Education,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FieldGroup::Identity => "Basic Profile",
            FieldGroup::Residence => "Residence",
            FieldGroup::Household => "Household",
            FieldGroup::Guardian => "Family / Guardian",
            FieldGroup::Education => "Education",
        }
    }

    /// 该分组下的所有字段（按 ProfileField::ALL 顺序）
    pub fn fields(&self) -> impl Iterator<Item = ProfileField> + '_ {
        ProfileField::ALL
            .iter()
            .copied()
            .filter(move |f| f.group() == *self)
    }
}

// ═══════════════════════════════════════════════════════════════════
// ProfileField
// ═══════════════════════════════════════════════════════════════════

/// 档案字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    // Identity
    Name,
    DateOfBirth,
    Gender,
    Phone,
    Email,
    ProfileImageUri,
    // Residence
    Address,
    PostalCode,
    Province,
    CitizenshipStatus,
    // Household
    HouseholdSize,
    FamilyComposition,
    AnnualFamilyNetIncome,
    // Guardian
    GuardianName,
    GuardianPhone,
    GuardianEmail,
    // Education
    HighestEducation,
    HighSchoolName,
    GraduationDate,
    TradeSchoolName,
    TradeProgramName,
    TradeGraduationDate,
    Trade,
    ApprenticeshipLevel,
}

impl ProfileField {
    pub const ALL: [ProfileField; 24] = [
        ProfileField::Name,
        ProfileField::DateOfBirth,
        ProfileField::Gender,
        ProfileField::Phone,
        ProfileField::Email,
        ProfileField::ProfileImageUri,
        ProfileField::Address,
        ProfileField::PostalCode,
        ProfileField::Province,
        ProfileField::CitizenshipStatus,
        ProfileField::HouseholdSize,
        ProfileField::FamilyComposition,
        ProfileField::AnnualFamilyNetIncome,
        ProfileField::GuardianName,
        ProfileField::GuardianPhone,
        ProfileField::GuardianEmail,
        ProfileField::HighestEducation,
        ProfileField::HighSchoolName,
        ProfileField::GraduationDate,
        ProfileField::TradeSchoolName,
        ProfileField::TradeProgramName,
        ProfileField::TradeGraduationDate,
        ProfileField::Trade,
        ProfileField::ApprenticeshipLevel,
    ];

    /// 持久化使用的 key（camelCase）
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::DateOfBirth => "dateOfBirth",
            ProfileField::Gender => "gender",
            ProfileField::Phone => "phone",
            ProfileField::Email => "email",
            ProfileField::ProfileImageUri => "profileImageUri",
            ProfileField::Address => "address",
            ProfileField::PostalCode => "postalCode",
            ProfileField::Province => "province",
            ProfileField::CitizenshipStatus => "citizenshipStatus",
            ProfileField::HouseholdSize => "householdSize",
            ProfileField::FamilyComposition => "familyComposition",
            ProfileField::AnnualFamilyNetIncome => "annualFamilyNetIncome",
            ProfileField::GuardianName => "guardianName",
            ProfileField::GuardianPhone => "guardianPhone",
            ProfileField::GuardianEmail => "guardianEmail",
            ProfileField::HighestEducation => "highestEducation",
            ProfileField::HighSchoolName => "highSchoolName",
            ProfileField::GraduationDate => "graduationDate",
            ProfileField::TradeSchoolName => "tradeSchoolName",
            ProfileField::TradeProgramName => "tradeProgramName",
            ProfileField::TradeGraduationDate => "tradeGraduationDate",
            ProfileField::Trade => "trade",
            ProfileField::ApprenticeshipLevel => "apprenticeshipLevel",
        }
    }

    pub fn group(&self) -> FieldGroup {
        use ProfileField::*;
        match self {
            Name | DateOfBirth | Gender | Phone | Email | ProfileImageUri => FieldGroup::Identity,
            Address | PostalCode | Province | CitizenshipStatus => FieldGroup::Residence,
            HouseholdSize | FamilyComposition | AnnualFamilyNetIncome => FieldGroup::Household,
            GuardianName | GuardianPhone | GuardianEmail => FieldGroup::Guardian,
            _ => FieldGroup::Education,
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知字段名
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for ProfileField {
    type Err = UnknownField;

    /// 接受 camelCase（存储格式）或 snake_case（命令行习惯）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        ProfileField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().to_lowercase() == normalized)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// ProfileRecord
// ═══════════════════════════════════════════════════════════════════

/// 扁平的用户档案记录 - 对应存储中的 `@profile_data`
///
/// `#[serde(default)]` 保证缺失字段回落为空字符串，
/// 这也是旧数据在 schema 增加字段后仍能完整加载的原因。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileRecord {
    // Basic Profile
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub profile_image_uri: String,
    // Residence
    pub address: String,
    pub postal_code: String,
    pub province: String,
    pub citizenship_status: String,
    // Household
    pub household_size: String,
    pub family_composition: String,
    pub annual_family_net_income: String,
    // Family/Guardian
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: String,
    // Education
    pub highest_education: String,
    pub high_school_name: String,
    pub graduation_date: String,
    pub trade_school_name: String,
    pub trade_program_name: String,
    pub trade_graduation_date: String,
    pub trade: String,
    pub apprenticeship_level: String,
}

impl ProfileRecord {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::Gender => &self.gender,
            ProfileField::Phone => &self.phone,
            ProfileField::Email => &self.email,
            ProfileField::ProfileImageUri => &self.profile_image_uri,
            ProfileField::Address => &self.address,
            ProfileField::PostalCode => &self.postal_code,
            ProfileField::Province => &self.province,
            ProfileField::CitizenshipStatus => &self.citizenship_status,
            ProfileField::HouseholdSize => &self.household_size,
            ProfileField::FamilyComposition => &self.family_composition,
            ProfileField::AnnualFamilyNetIncome => &self.annual_family_net_income,
            ProfileField::GuardianName => &self.guardian_name,
            ProfileField::GuardianPhone => &self.guardian_phone,
            ProfileField::GuardianEmail => &self.guardian_email,
            ProfileField::HighestEducation => &self.highest_education,
            ProfileField::HighSchoolName => &self.high_school_name,
            ProfileField::GraduationDate => &self.graduation_date,
            ProfileField::TradeSchoolName => &self.trade_school_name,
            ProfileField::TradeProgramName => &self.trade_program_name,
            ProfileField::TradeGraduationDate => &self.trade_graduation_date,
            ProfileField::Trade => &self.trade,
            ProfileField::ApprenticeshipLevel => &self.apprenticeship_level,
        }
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::DateOfBirth => &mut self.date_of_birth,
            ProfileField::Gender => &mut self.gender,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Email => &mut self.email,
            ProfileField::ProfileImageUri => &mut self.profile_image_uri,
            ProfileField::Address => &mut self.address,
            ProfileField::PostalCode => &mut self.postal_code,
            ProfileField::Province => &mut self.province,
            ProfileField::CitizenshipStatus => &mut self.citizenship_status,
            ProfileField::HouseholdSize => &mut self.household_size,
            ProfileField::FamilyComposition => &mut self.family_composition,
            ProfileField::AnnualFamilyNetIncome => &mut self.annual_family_net_income,
            ProfileField::GuardianName => &mut self.guardian_name,
            ProfileField::GuardianPhone => &mut self.guardian_phone,
            ProfileField::GuardianEmail => &mut self.guardian_email,
            ProfileField::HighestEducation => &mut self.highest_education,
            ProfileField::HighSchoolName => &mut self.high_school_name,
            ProfileField::GraduationDate => &mut self.graduation_date,
            ProfileField::TradeSchoolName => &mut self.trade_school_name,
            ProfileField::TradeProgramName => &mut self.trade_program_name,
            ProfileField::TradeGraduationDate => &mut self.trade_graduation_date,
            ProfileField::Trade => &mut self.trade,
            ProfileField::ApprenticeshipLevel => &mut self.apprenticeship_level,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// 右偏合并：patch 中出现的字段覆盖当前值，其余保持不变
    pub fn merge(&self, patch: &ProfilePatch) -> ProfileRecord {
        let mut merged = self.clone();
        for (field, value) in patch.iter() {
            merged.set(field, value);
        }
        merged
    }

    /// 是否全部为默认值（空字符串）
    pub fn is_blank(&self) -> bool {
        ProfileField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// 非空字段数量
    pub fn filled_count(&self) -> usize {
        ProfileField::ALL
            .iter()
            .filter(|f| !self.get(**f).is_empty())
            .count()
    }
}

// ═══════════════════════════════════════════════════════════════════
// ProfilePatch
// ═══════════════════════════════════════════════════════════════════

/// 部分更新：字段子集 → 新值
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfilePatch {
    values: BTreeMap<ProfileField, String>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式设置字段
    pub fn with(mut self, field: ProfileField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> + '_ {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl From<ProfileRecord> for ProfilePatch {
    /// 完整记录转换为包含全部字段的 patch
    fn from(record: ProfileRecord) -> Self {
        let values = ProfileField::ALL
            .iter()
            .map(|f| (*f, record.get(*f).to_string()))
            .collect();
        Self { values }
    }
}

impl FromIterator<(ProfileField, String)> for ProfilePatch {
    fn from_iter<I: IntoIterator<Item = (ProfileField, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// 测试
// ═══════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>(), Ok(field));
        }
        assert_eq!(
            "date_of_birth".parse::<ProfileField>(),
            Ok(ProfileField::DateOfBirth)
        );
        assert!("nickname".parse::<ProfileField>().is_err());
    }

    #[test]
    fn test_serialized_keys_match_field_names() {
        let json = serde_json::to_value(ProfileRecord::default()).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), ProfileField::ALL.len());
        for field in ProfileField::ALL {
            assert_eq!(obj.get(field.as_str()), Some(&serde_json::json!("")));
        }
    }

    #[test]
    fn test_merge_is_right_biased() {
        let base = ProfileRecord::default().merge(&ProfilePatch::new().with(ProfileField::Name, "A"));
        let merged = base.merge(
            &ProfilePatch::new()
                .with(ProfileField::Phone, "555")
                .with(ProfileField::Name, "B"),
        );

        assert_eq!(merged.name, "B");
        assert_eq!(merged.phone, "555");
        assert_eq!(merged.filled_count(), 2);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let record = ProfileRecord::default().merge(&ProfilePatch::new().with(ProfileField::Email, "a@b.c"));
        assert_eq!(record.merge(&ProfilePatch::new()), record);
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let record: ProfileRecord =
            serde_json::from_str(r#"{"name":"Old","legacyField":"ignored"}"#).unwrap();

        assert_eq!(record.name, "Old");
        assert_eq!(record.filled_count(), 1);
    }

    #[test]
    fn test_full_record_patch_covers_every_field() {
        let patch = ProfilePatch::from(ProfileRecord::default());
        assert_eq!(patch.len(), ProfileField::ALL.len());
    }

    #[test]
    fn test_groups_cover_every_field_once() {
        let total: usize = FieldGroup::ALL.iter().map(|g| g.fields().count()).sum();
        assert_eq!(total, ProfileField::ALL.len());
        assert_eq!(FieldGroup::Education.fields().count(), 8);
    }
}
