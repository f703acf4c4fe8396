//! Domain services - Pure business rules that span entities

pub mod skill_description;
pub mod skill_tree;

pub use skill_description::{describe_skill, SkillDescription, SkillTag};
pub use skill_tree::{
    add_custom_skill, add_skill, add_xp, delete_skill, exists, group_by_domain,
    threshold_for_level, CustomSkill, DomainGroup, NewSkill, ParentRef, SkillGroups,
    SkillTreeError, XpGain,
};
