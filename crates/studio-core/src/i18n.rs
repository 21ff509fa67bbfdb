//! Typed UI-string catalog.
//!
//! Every string the front end shows goes through [`tr`]; the exhaustive
//! match means a missing translation is a compile error, not a blank
//! label at render time.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Es,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    HeaderTitle,
    HeaderSubtitle,
    LoginTitle,
    LoginPrompt,
    LoginButton,
    LoginError,
    LoginMissingSecret,
    TabInbox,
    TabManual,
    InboxHeader,
    InboxEmpty,
    ManualLabel,
    ManualPlaceholder,
    ReadEmailTitle,
    ModeTitle,
    ModeStandard,
    ModeStandardDesc,
    ModeSearch,
    ModeSearchDesc,
    ModeThinking,
    ModeThinkingDesc,
    InstructionsTitle,
    InstructionsPlaceholder,
    GenerateBtn,
    GeneratingBtn,
    PreviewPlaceholder,
    PreviewPlaceholderDesc,
    PreviewGenerating,
    PreviewFailed,
    PreviewTab,
    CodeTab,
    FormatBtn,
    ExpandBtn,
    CopyBtn,
    CopiedBtn,
    SubjectLabel,
    EditHtmlTip,
    ModalTitle,
    CloseBtn,
    RefinePlaceholder,
    RefineBtn,
    RefineBtnLoading,
    ApproveBtn,
    DiscardBtn,
    DiscardConfirmTitle,
    DiscardConfirmBody,
    ConfirmYes,
    ConfirmNo,
    QaEmpathetic,
    QaFirm,
    QaRefund,
    QaDiscount,
    QaShipping,
    QaShippingValue,
    StoreNotConfigured,
}

/// Look up a UI string for the given language.
pub fn tr(lang: Lang, text: Text) -> &'static str {
    match lang {
        Lang::En => english(text),
        Lang::Es => spanish(text),
    }
}

fn english(text: Text) -> &'static str {
    match text {
        Text::HeaderTitle => "A.Cliente Pro",
        Text::HeaderSubtitle => "Response Studio",
        Text::LoginTitle => "Operator Access",
        Text::LoginPrompt => "Enter the access passphrase",
        Text::LoginButton => "Sign In",
        Text::LoginError => "Incorrect passphrase. Try again.",
        Text::LoginMissingSecret => "No access passphrase is configured.",
        Text::TabInbox => "Inbox",
        Text::TabManual => "Paste",
        Text::InboxHeader => "Incoming Messages",
        Text::InboxEmpty => "All caught up",
        Text::ManualLabel => "Context",
        Text::ManualPlaceholder => "Paste customer email content here...",
        Text::ReadEmailTitle => "Message Details",
        Text::ModeTitle => "Intelligence Model",
        Text::ModeStandard => "Standard",
        Text::ModeStandardDesc => "Balanced",
        Text::ModeSearch => "Search",
        Text::ModeSearchDesc => "Web Data",
        Text::ModeThinking => "Deep Reason",
        Text::ModeThinkingDesc => "Complex",
        Text::InstructionsTitle => "Tone & Intent",
        Text::InstructionsPlaceholder => "Describe how to reply...",
        Text::GenerateBtn => "Draft Response",
        Text::GeneratingBtn => "Drafting...",
        Text::PreviewPlaceholder => "Ready to Assist",
        Text::PreviewPlaceholderDesc => {
            "Select a customer email from the inbox to instantly generate a professional response."
        }
        Text::PreviewGenerating => "Crafting response...",
        Text::PreviewFailed => "Generation Failed",
        Text::PreviewTab => "Preview",
        Text::CodeTab => "Code",
        Text::FormatBtn => "Prettify",
        Text::ExpandBtn => "Expand",
        Text::CopyBtn => "Copy HTML",
        Text::CopiedBtn => "Copied!",
        Text::SubjectLabel => "Subject Line",
        Text::EditHtmlTip => {
            "Tip: search for 'INSERT_LINK_HERE' in the code to add your custom links."
        }
        Text::ModalTitle => "Preview Message",
        Text::CloseBtn => "Close",
        Text::RefinePlaceholder => "Tell AI how to improve this draft...",
        Text::RefineBtn => "Refine",
        Text::RefineBtnLoading => "Updating...",
        Text::ApproveBtn => "Approve",
        Text::DiscardBtn => "Discard",
        Text::DiscardConfirmTitle => "Discard message",
        Text::DiscardConfirmBody => {
            "Are you sure you want to discard this email as spam? This action cannot be undone."
        }
        Text::ConfirmYes => "Discard",
        Text::ConfirmNo => "Cancel",
        Text::QaEmpathetic => "Empathetic",
        Text::QaFirm => "Firm/Polite",
        Text::QaRefund => "Refund",
        Text::QaDiscount => "Discount",
        Text::QaShipping => "Shipping Times",
        Text::QaShippingValue => {
            "Clarify that preparation time is 1-3 business days and shipping time is 3-6 business days."
        }
        Text::StoreNotConfigured => {
            "Record store is not configured; the inbox is unavailable."
        }
    }
}

fn spanish(text: Text) -> &'static str {
    match text {
        Text::HeaderTitle => "A.Cliente Pro",
        Text::HeaderSubtitle => "Estudio de Respuestas",
        Text::LoginTitle => "Acceso de Operador",
        Text::LoginPrompt => "Introduce la frase de acceso",
        Text::LoginButton => "Entrar",
        Text::LoginError => "Contraseña incorrecta. Inténtalo de nuevo.",
        Text::LoginMissingSecret => "No hay frase de acceso configurada.",
        Text::TabInbox => "Bandeja",
        Text::TabManual => "Pegar",
        Text::InboxHeader => "Mensajes Entrantes",
        Text::InboxEmpty => "Todo al día",
        Text::ManualLabel => "Contexto",
        Text::ManualPlaceholder => "Pega el contenido del correo aquí...",
        Text::ReadEmailTitle => "Detalle del Mensaje",
        Text::ModeTitle => "Modelo de Inteligencia",
        Text::ModeStandard => "Estándar",
        Text::ModeStandardDesc => "Balanceado",
        Text::ModeSearch => "Búsqueda",
        Text::ModeSearchDesc => "Datos Web",
        Text::ModeThinking => "Razonamiento",
        Text::ModeThinkingDesc => "Complejo",
        Text::InstructionsTitle => "Tono e Intención",
        Text::InstructionsPlaceholder => "Describe cómo responder...",
        Text::GenerateBtn => "Redactar Respuesta",
        Text::GeneratingBtn => "Redactando...",
        Text::PreviewPlaceholder => "Listo para Asistir",
        Text::PreviewPlaceholderDesc => {
            "Selecciona un correo de la bandeja para generar una respuesta profesional al instante."
        }
        Text::PreviewGenerating => "Diseñando respuesta...",
        Text::PreviewFailed => "Fallo en Generación",
        Text::PreviewTab => "Vista Previa",
        Text::CodeTab => "Código",
        Text::FormatBtn => "Embellecer",
        Text::ExpandBtn => "Expandir",
        Text::CopyBtn => "Copiar HTML",
        Text::CopiedBtn => "¡Copiado!",
        Text::SubjectLabel => "Asunto",
        Text::EditHtmlTip => {
            "Tip: busca 'INSERT_LINK_HERE' en el código para poner tus enlaces reales."
        }
        Text::ModalTitle => "Vista Previa",
        Text::CloseBtn => "Cerrar",
        Text::RefinePlaceholder => "Dile a la IA cómo mejorar este borrador...",
        Text::RefineBtn => "Mejorar",
        Text::RefineBtnLoading => "Actualizando...",
        Text::ApproveBtn => "Aprobar",
        Text::DiscardBtn => "Descartar",
        Text::DiscardConfirmTitle => "Descartar mensaje",
        Text::DiscardConfirmBody => {
            "¿Estás seguro de que quieres descartar este correo como spam? Esta acción no se puede deshacer."
        }
        Text::ConfirmYes => "Descartar",
        Text::ConfirmNo => "Cancelar",
        Text::QaEmpathetic => "Empático",
        Text::QaFirm => "Firme/Educado",
        Text::QaRefund => "Reembolso",
        Text::QaDiscount => "Descuento",
        Text::QaShipping => "Tiempos de Envío",
        Text::QaShippingValue => {
            "Aclarar que el tiempo estimado de preparación es de 1 a 3 días hábiles y el tiempo de envío es de 3 a 6 días hábiles."
        }
        Text::StoreNotConfigured => {
            "El almacén de registros no está configurado; la bandeja no está disponible."
        }
    }
}
