//! User-facing text for stages, actions and decision reasons.

use yardim_models::{Locale, WorkflowAction, WorkflowStage};

use crate::analytics::AttentionReason;
use crate::engine::TransitionError;

pub fn stage_label(stage: WorkflowStage, locale: Locale) -> &'static str {
    use WorkflowStage::*;

    match locale {
        Locale::Tr => match stage {
            Draft => "Taslak",
            Submitted => "Gönderildi",
            UnderReview => "İnceleniyor",
            NeedsInfo => "Bilgi Bekleniyor",
            Approved => "Onaylandı",
            Rejected => "Reddedildi",
            Distribution => "Dağıtımda",
            Completed => "Tamamlandı",
            Cancelled => "İptal Edildi",
        },
        Locale::En => match stage {
            Draft => "Draft",
            Submitted => "Submitted",
            UnderReview => "Under review",
            NeedsInfo => "Awaiting information",
            Approved => "Approved",
            Rejected => "Rejected",
            Distribution => "In distribution",
            Completed => "Completed",
            Cancelled => "Cancelled",
        },
    }
}

pub fn stage_description(stage: WorkflowStage, locale: Locale) -> &'static str {
    use WorkflowStage::*;

    match locale {
        Locale::Tr => match stage {
            Draft => "Başvuru henüz tamamlanmadı",
            Submitted => "Başvuru inceleme için bekliyor",
            UnderReview => "Başvuru değerlendiriliyor",
            NeedsInfo => "Ek bilgi/belge gerekli",
            Approved => "Başvuru onaylandı, dağıtım bekliyor",
            Rejected => "Başvuru reddedildi",
            Distribution => "Yardım dağıtılıyor",
            Completed => "Yardım teslim edildi",
            Cancelled => "Başvuru iptal edildi",
        },
        Locale::En => match stage {
            Draft => "Application is not complete yet",
            Submitted => "Application is waiting for review",
            UnderReview => "Application is being evaluated",
            NeedsInfo => "Additional information or documents required",
            Approved => "Application approved, awaiting distribution",
            Rejected => "Application rejected",
            Distribution => "Aid is being distributed",
            Completed => "Aid delivered",
            Cancelled => "Application cancelled",
        },
    }
}

pub fn action_label(action: WorkflowAction, locale: Locale) -> &'static str {
    use WorkflowAction::*;

    match locale {
        Locale::Tr => match action {
            Submit => "Gönder",
            StartReview => "İncelemeye Al",
            RequestInfo => "Bilgi İste",
            ProvideInfo => "Bilgi Gönder",
            Approve => "Onayla",
            Reject => "Reddet",
            Reopen => "Yeniden Aç",
            StartDistribution => "Dağıtıma Başla",
            Complete => "Tamamla",
            Cancel => "İptal Et",
        },
        Locale::En => match action {
            Submit => "Submit",
            StartReview => "Start review",
            RequestInfo => "Request information",
            ProvideInfo => "Provide information",
            Approve => "Approve",
            Reject => "Reject",
            Reopen => "Reopen",
            StartDistribution => "Start distribution",
            Complete => "Complete",
            Cancel => "Cancel",
        },
    }
}

pub fn transition_error(error: &TransitionError, locale: Locale) -> String {
    match (error, locale) {
        (TransitionError::InvalidTransition { action, .. }, Locale::Tr) => format!(
            "Bu aşamada \"{}\" işlemi yapılamaz",
            action_label(*action, locale)
        ),
        (TransitionError::InvalidTransition { action, stage }, Locale::En) => format!(
            "\"{}\" is not possible while the case is {}",
            action_label(*action, locale),
            stage_label(*stage, locale).to_lowercase()
        ),
        (TransitionError::InsufficientRole { .. }, Locale::Tr) => {
            "Bu işlem için yetkiniz bulunmuyor".to_string()
        }
        (TransitionError::InsufficientRole { .. }, Locale::En) => {
            "You are not allowed to perform this action".to_string()
        }
        (TransitionError::CommentRequired { .. }, Locale::Tr) => {
            "Bu işlem için açıklama gereklidir".to_string()
        }
        (TransitionError::CommentRequired { .. }, Locale::En) => {
            "A comment is required for this action".to_string()
        }
    }
}

pub fn attention_reason(reason: AttentionReason, locale: Locale) -> &'static str {
    match (reason, locale) {
        (AttentionReason::Overdue, Locale::Tr) => "Süresi geçmiş",
        (AttentionReason::Overdue, Locale::En) => "Overdue",
        (AttentionReason::AwaitingInfo, Locale::Tr) => "Bilgi bekleniyor",
        (AttentionReason::AwaitingInfo, Locale::En) => "Awaiting information",
        (AttentionReason::ReviewNeeded, Locale::Tr) => "İnceleme gerekiyor",
        (AttentionReason::ReviewNeeded, Locale::En) => "Review needed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stage_has_labels() {
        for stage in WorkflowStage::ALL {
            for locale in [Locale::Tr, Locale::En] {
                assert!(!stage_label(stage, locale).is_empty());
                assert!(!stage_description(stage, locale).is_empty());
            }
        }
    }

    #[test]
    fn test_invalid_transition_names_action() {
        let error = TransitionError::InvalidTransition {
            stage: WorkflowStage::Draft,
            action: WorkflowAction::Approve,
        };

        assert_eq!(transition_error(&error, Locale::Tr), "Bu aşamada \"Onayla\" işlemi yapılamaz");
        assert_eq!(
            transition_error(&error, Locale::En),
            "\"Approve\" is not possible while the case is draft"
        );
    }

    #[test]
    fn test_comment_required_mentions_comment() {
        let error = TransitionError::CommentRequired {
            action: WorkflowAction::Reject,
        };

        assert!(transition_error(&error, Locale::Tr).contains("açıklama"));
        assert!(transition_error(&error, Locale::En).contains("comment"));
    }

    #[test]
    fn test_attention_reasons() {
        assert_eq!(attention_reason(AttentionReason::Overdue, Locale::Tr), "Süresi geçmiş");
        assert_eq!(attention_reason(AttentionReason::AwaitingInfo, Locale::Tr), "Bilgi bekleniyor");
        assert_eq!(attention_reason(AttentionReason::ReviewNeeded, Locale::Tr), "İnceleme gerekiyor");
    }
}
