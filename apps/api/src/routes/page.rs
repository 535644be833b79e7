use axum::response::Html;

/// GET /
/// Single-page upload UI. All state lives in the browser; the server keeps none.
pub async fn serve_upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE_HTML)
}

const UPLOAD_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Оценка резюме</title>
  <style>
    * { box-sizing: border-box; }
    body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
    h1 { font-size: 1.6rem; }
    h2 { font-size: 1.15rem; margin-top: 1.5rem; }
    textarea { width: 100%; height: 300px; font-family: monospace; font-size: .85rem; }
    .note { padding: .75rem 1rem; border-radius: 6px; margin: .75rem 0; }
    .info { background: #e8f1fb; }
    .success { background: #e6f6ea; }
    .warning { background: #fff6dc; }
    .error { background: #fde8e8; }
    .hidden { display: none; }
    input[type=text] { width: 100%; padding: .5rem; }
    button { margin-top: .5rem; padding: .5rem 1rem; }
    hr { margin: 2rem 0; }
  </style>
</head>
<body>
  <h1>📄 Оценка резюме для вакансии телефониста</h1>

  <input id="file" type="file" accept="application/pdf,.pdf">
  <div id="hint" class="note info">⬆️ Пожалуйста, загрузите PDF-файл резюме</div>
  <div id="failure" class="note error hidden"></div>

  <section id="result" class="hidden">
    <h2>📝 Извлечённый текст:</h2>
    <textarea id="preview" readonly></textarea>

    <h2 id="score-title"></h2>
    <div id="verdict" class="note"></div>

    <div id="reasons">
      <h2>📌 Причины начисления баллов:</h2>
      <ul id="report"></ul>
    </div>

    <hr>
    <h2>🤖 Задать вопрос ИИ по резюме</h2>
    <input id="question" type="text" placeholder="Введите вопрос к ИИ">
    <button id="ask">Спросить у GPT</button>
    <div id="thinking" class="hidden">GPT думает...</div>
    <div id="answer-block" class="hidden">
      <p><strong>Ответ:</strong></p>
      <div id="answer"></div>
    </div>
  </section>

<script>
  const $ = (id) => document.getElementById(id);
  let resumeText = null;

  const tone = {
    auto_rejected: "error",
    high_match: "success",
    partial_match: "warning",
    no_match: "error",
  };

  function showFailure(message) {
    const box = $("failure");
    box.textContent = message;
    box.classList.remove("hidden");
  }

  async function errorMessage(response) {
    try {
      const body = await response.json();
      return body.error.message;
    } catch (_) {
      return "HTTP " + response.status;
    }
  }

  $("file").addEventListener("change", async (event) => {
    const file = event.target.files[0];
    $("failure").classList.add("hidden");
    $("result").classList.add("hidden");
    $("answer-block").classList.add("hidden");
    resumeText = null;
    if (!file) {
      $("hint").classList.remove("hidden");
      return;
    }
    $("hint").classList.add("hidden");

    const form = new FormData();
    form.append("file", file);
    const response = await fetch("/api/v1/resumes/score", { method: "POST", body: form });
    if (!response.ok) {
      showFailure(await errorMessage(response));
      return;
    }
    const data = await response.json();
    resumeText = data.text;

    $("preview").value = data.preview;
    const rejected = data.verdict === "auto_rejected";
    $("score-title").textContent = rejected ? "" : "🔢 Итоговая оценка: " + data.score + " баллов";
    $("verdict").className = "note " + tone[data.verdict];
    $("verdict").textContent = data.verdict_message;
    $("reasons").classList.toggle("hidden", rejected);
    const list = $("report");
    list.replaceChildren(...data.report.map((line) => {
      const item = document.createElement("li");
      item.textContent = line;
      return item;
    }));
    $("result").classList.remove("hidden");
  });

  $("ask").addEventListener("click", async () => {
    const question = $("question").value;
    if (resumeText === null || question.trim() === "") return;

    $("thinking").classList.remove("hidden");
    $("answer-block").classList.add("hidden");
    try {
      const response = await fetch("/api/v1/resumes/ask", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ resume_text: resumeText, question }),
      });
      const answer = $("answer");
      if (!response.ok) {
        answer.textContent = await errorMessage(response);
      } else {
        const data = await response.json();
        answer.textContent = data.status === "answered" ? data.answer : data.message;
      }
      $("answer-block").classList.remove("hidden");
    } finally {
      $("thinking").classList.add("hidden");
    }
  });
</script>
</body>
</html>
"#;
