//! Code review prompt text.
//!
//! The body is a fixed five-section checklist. A language block and a focus
//! block are appended when the caller names a recognized language or focus;
//! anything else is ignored.

/// Languages with dedicated review guidelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewLanguage {
    TypeScript,
    JavaScript,
    Python,
    Java,
    Go,
}

static LANGUAGE_GUIDELINES: &[(ReviewLanguage, &str, &str)] = &[
    (
        ReviewLanguage::TypeScript,
        "typescript",
        "## TypeScript 가이드라인\n\
         - 타입 안정성: any 사용을 피하고 명시적인 타입을 정의했는지 확인하세요.\n\
         - strict 모드 규칙(null 체크, 암시적 any 금지)을 지키는지 확인하세요.\n\
         - 인터페이스와 제네릭을 적절히 활용했는지 검토하세요.",
    ),
    (
        ReviewLanguage::JavaScript,
        "javascript",
        "## JavaScript 가이드라인\n\
         - var 대신 const/let을 사용하는지 확인하세요.\n\
         - 비동기 코드에서 Promise 거부와 예외가 처리되는지 확인하세요.\n\
         - 암묵적 형 변환(== 비교 등)으로 인한 버그가 없는지 검토하세요.",
    ),
    (
        ReviewLanguage::Python,
        "python",
        "## Python 가이드라인\n\
         - PEP 8 스타일 가이드를 따르는지 확인하세요.\n\
         - 타입 힌트가 적절히 사용되었는지 확인하세요.\n\
         - 리스트 컴프리헨션과 제너레이터 등 파이썬다운 표현을 활용했는지 검토하세요.",
    ),
    (
        ReviewLanguage::Java,
        "java",
        "## Java 가이드라인\n\
         - 객체 지향 원칙(캡슐화, 단일 책임)을 지키는지 확인하세요.\n\
         - 예외 처리가 적절하고 리소스가 try-with-resources로 해제되는지 확인하세요.\n\
         - null 처리에 Optional 등을 활용했는지 검토하세요.",
    ),
    (
        ReviewLanguage::Go,
        "go",
        "## Go 가이드라인\n\
         - 반환된 에러를 빠짐없이 확인하고 처리하는지 확인하세요.\n\
         - 고루틴과 채널 사용 시 경쟁 상태나 누수가 없는지 확인하세요.\n\
         - gofmt와 Go 관용구(짧은 변수명, 작은 인터페이스)를 따르는지 검토하세요.",
    ),
];

impl ReviewLanguage {
    /// Match a language name case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        LANGUAGE_GUIDELINES
            .iter()
            .find(|(_, key, _)| key.eq_ignore_ascii_case(name))
            .map(|(lang, _, _)| *lang)
    }

    pub fn guidelines(self) -> &'static str {
        LANGUAGE_GUIDELINES
            .iter()
            .find(|(lang, _, _)| *lang == self)
            .map_or("", |(_, _, text)| *text)
    }
}

/// Review emphasis with dedicated guidelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Performance,
    Security,
    Readability,
}

static FOCUS_GUIDELINES: &[(Focus, &str, &str)] = &[
    (
        Focus::Performance,
        "performance",
        "## 성능 중점 검토\n\
         - 불필요한 반복 연산과 중첩 루프가 없는지 확인하세요.\n\
         - 시간/공간 복잡도를 분석하고 더 나은 자료구조가 있는지 검토하세요.\n\
         - 불필요한 메모리 할당과 I/O 호출을 줄일 수 있는지 확인하세요.",
    ),
    (
        Focus::Security,
        "security",
        "## 보안 중점 검토\n\
         - 사용자 입력이 검증되고 이스케이프되는지 확인하세요.\n\
         - SQL 인젝션, XSS 등 주입 공격에 취약하지 않은지 확인하세요.\n\
         - 비밀번호, API 키 같은 민감 정보가 코드나 로그에 노출되지 않는지 검토하세요.",
    ),
    (
        Focus::Readability,
        "readability",
        "## 가독성 중점 검토\n\
         - 변수와 함수 이름이 의도를 명확히 드러내는지 확인하세요.\n\
         - 함수가 한 가지 일만 하도록 적절히 분리되었는지 확인하세요.\n\
         - 복잡한 로직에 필요한 주석이 있는지 검토하세요.",
    ),
];

impl Focus {
    /// Match a focus name case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        FOCUS_GUIDELINES
            .iter()
            .find(|(_, key, _)| key.eq_ignore_ascii_case(name))
            .map(|(focus, _, _)| *focus)
    }

    pub fn guidelines(self) -> &'static str {
        FOCUS_GUIDELINES
            .iter()
            .find(|(focus, _, _)| *focus == self)
            .map_or("", |(_, _, text)| *text)
    }
}

/// Inputs of the code review prompt.
#[derive(Debug, Clone, Default)]
pub struct ReviewRequest {
    pub code: String,
    pub language: Option<String>,
    pub focus: Option<String>,
}

impl ReviewRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }

    /// Render the full review prompt.
    pub fn render(&self) -> String {
        let fence = self.language.as_deref().unwrap_or("").trim();
        let mut text = format!(
            "다음 코드를 리뷰해주세요:\n\n\
             ```{fence}\n{}\n```\n\n\
             다음 항목을 중심으로 검토해주세요:\n\n\
             1. 코드 품질: 구조, 명명 규칙, 중복 여부를 평가해주세요.\n\
             2. 잠재적 버그: 예외 상황, 경계 조건, 오류 처리 누락을 찾아주세요.\n\
             3. 성능: 비효율적인 연산이나 개선 가능한 부분을 지적해주세요.\n\
             4. 보안: 취약점이나 위험한 패턴이 있는지 확인해주세요.\n\
             5. 개선 제안: 구체적인 수정 예시와 함께 개선 방법을 제안해주세요.",
            self.code
        );

        if let Some(lang) = self.language.as_deref().and_then(ReviewLanguage::from_name) {
            text.push_str("\n\n");
            text.push_str(lang.guidelines());
        }
        if let Some(focus) = self.focus.as_deref().and_then(Focus::from_name) {
            text.push_str("\n\n");
            text.push_str(focus.guidelines());
        }

        text
    }
}
