use super::{TabValidation, ValidationContext};
use crate::backend::{BackendError, CertificateUpload, RegistryBackend};
use crate::shared::patterns::is_hostname;
use crate::wizard::{ErrorKind, ErrorSet, Field, DNS_PORTALS};

/// One certificate waiting for a remote PEM check, tagged with the field an
/// error is reported on.
#[derive(Debug, Clone, Copy)]
pub struct PemCheck<'a> {
    pub field: Field,
    pub upload: &'a CertificateUpload,
}

#[derive(Debug)]
pub struct PemQueueReport {
    pub checked: usize,
    pub failed: Option<(Field, BackendError)>,
}

/// Checks certificates one at a time in queue order. The first rejection
/// stops the queue; later entries are not sent.
pub fn check_pem_queue(queue: &[PemCheck<'_>], backend: &dyn RegistryBackend) -> PemQueueReport {
    let mut checked = 0;
    for entry in queue {
        checked += 1;
        if let Err(err) = backend.check_pem(entry.upload) {
            return PemQueueReport {
                checked,
                failed: Some((entry.field, err)),
            };
        }
    }
    PemQueueReport {
        checked,
        failed: None,
    }
}

pub(super) fn validate(ctx: &ValidationContext<'_>) -> TabValidation {
    let mut errors = ErrorSet::default();
    let mut queue = Vec::new();

    for portal in DNS_PORTALS {
        let Some(state) = ctx.form.dns.portal(portal) else {
            continue;
        };
        let host = state.host.trim();
        if host.is_empty() {
            if state.certificate.is_some() {
                errors.raise(ErrorKind::Format, Field::DnsHost(portal));
            }
            continue;
        }

        if !is_hostname(host) {
            errors.raise(ErrorKind::Format, Field::DnsHost(portal));
        }
        match &state.certificate {
            Some(upload) => queue.push(PemCheck {
                field: Field::DnsCertificate(portal),
                upload,
            }),
            None if state.preloaded.as_deref() != Some(host) => {
                errors.raise(ErrorKind::Required, Field::DnsCertificate(portal));
            }
            None => {}
        }
    }

    if !errors.is_empty() {
        return TabValidation::settled(errors.into_outcome());
    }

    // Citizen goes first, then officer.
    queue.reverse();
    let report = check_pem_queue(&queue, ctx.backend);
    if let Some((field, err)) = report.failed {
        ctx.log.warn(
            "backend.error",
            &format!("certificate check for {} failed: {err}", field.as_str()),
        );
        errors.raise(ErrorKind::Type, field);
    }
    TabValidation::settled(errors.into_outcome())
}
