use error_stack::{Context, Report};

/// Attaches everything figment knows about a failed extraction
/// (what went wrong, which key, which provider) to a report, since
/// the context type of the report alone says nothing about it.
pub trait FigmentErrorAttachable<T: Context> {
    fn attach_figment_error(self, err: figment::Error) -> Report<T>;
}

impl<T: Context> FigmentErrorAttachable<T> for Report<T> {
    fn attach_figment_error(self, e: figment::Error) -> Report<T> {
        let mut this = self;
        for error in e {
            this = this.attach_printable(error.kind.to_string());

            if let (Some(profile), Some(md)) = (&error.profile, &error.metadata) {
                if !error.path.is_empty() {
                    let key = md.interpolate(profile, &error.path);
                    this = this.attach_printable(format!("for key {key:?}"));
                }
            }

            if let Some(md) = &error.metadata {
                this = match &md.source {
                    Some(source) => this.attach_printable(format!("in {source} {}", md.name)),
                    None => this.attach_printable(format!("in {}", md.name)),
                };
            }
        }
        this
    }
}
