// src/routes.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::AppState, handlers};

pub fn create_router(app_state: AppState) -> Router {
    let professor_routes = Router::new()
        .route(
            "/",
            get(handlers::professores::listar_professores).post(handlers::professores::criar_professor),
        )
        .route(
            "/{id}",
            get(handlers::professores::buscar_professor)
                .put(handlers::professores::atualizar_professor)
                .delete(handlers::professores::deletar_professor),
        )
        .route("/{id}/enviar-moedas", post(handlers::professores::enviar_moedas))
        .route("/{id}/adicionar-moedas", patch(handlers::professores::adicionar_moedas));

    let vantagem_routes = Router::new()
        .route(
            "/",
            get(handlers::vantagens::listar_vantagens).post(handlers::vantagens::criar_vantagem),
        )
        .route(
            "/{id}",
            get(handlers::vantagens::buscar_vantagem)
                .put(handlers::vantagens::atualizar_vantagem)
                .delete(handlers::vantagens::deletar_vantagem),
        )
        .route("/{id}/resgatar", post(handlers::vantagens::resgatar_vantagem))
        .route(
            "/empresa/{id}",
            get(handlers::vantagens::listar_vantagens_por_empresa),
        );

    let transacao_routes = Router::new()
        .route("/", get(handlers::transacoes::listar_transacoes))
        .route("/{id}", get(handlers::transacoes::buscar_transacao))
        .route("/usuario/{id}", get(handlers::transacoes::listar_por_usuario))
        .route("/aluno/{id}", get(handlers::transacoes::listar_por_usuario))
        .route("/professor/{id}", get(handlers::transacoes::listar_por_usuario))
        .route("/tipo/{tipo}", get(handlers::transacoes::listar_por_tipo));

    let cupom_routes = Router::new()
        .route("/aluno/{id}", get(handlers::cupons::listar_cupons_do_aluno))
        .route("/{codigo}", get(handlers::cupons::buscar_cupom))
        .route("/{codigo}/utilizar", patch(handlers::cupons::utilizar_cupom));

    let instituicao_routes = Router::new().route(
        "/",
        get(handlers::cadastros::listar_instituicoes).post(handlers::cadastros::criar_instituicao),
    );

    let aluno_routes = Router::new()
        .route(
            "/",
            get(handlers::cadastros::listar_alunos).post(handlers::cadastros::criar_aluno),
        )
        .route("/{id}", get(handlers::cadastros::buscar_aluno));

    let empresa_routes = Router::new()
        .route(
            "/",
            get(handlers::cadastros::listar_empresas).post(handlers::cadastros::criar_empresa),
        )
        .route("/{id}", get(handlers::cadastros::buscar_empresa));

    // --- Locadora ---
    let client_routes = Router::new()
        .route(
            "/pedidos",
            get(handlers::locadora::listar_pedidos).post(handlers::locadora::criar_pedido),
        )
        .route(
            "/pedidos/{id}",
            get(handlers::locadora::buscar_pedido)
                .put(handlers::locadora::atualizar_pedido)
                .delete(handlers::locadora::excluir_pedido),
        );

    let agent_routes = Router::new()
        .route("/pedidos/pendentes", get(handlers::locadora::listar_pendentes))
        .route("/avaliar/{id}", post(handlers::locadora::avaliar_pedido))
        .route(
            "/veiculos",
            get(handlers::locadora::listar_veiculos).post(handlers::locadora::criar_veiculo),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/professores", professor_routes)
        .nest("/api/vantagens", vantagem_routes)
        .nest("/api/transacoes", transacao_routes)
        .nest("/api/cupons", cupom_routes)
        .nest("/api/instituicoes", instituicao_routes)
        .nest("/api/alunos", aluno_routes)
        .nest("/api/empresas", empresa_routes)
        .nest("/api/client", client_routes)
        .nest("/api/agent", agent_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::services::fixtures::TEST_BCRYPT_COST;

    fn create_test_app() -> Router {
        create_router(AppState::em_memoria(TEST_BCRYPT_COST))
    }

    async fn enviar(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(serde_json::to_string(&body).unwrap())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn cadastrar_professor(app: &Router) -> i64 {
        let (_, instituicao) =
            enviar(app, "POST", "/api/instituicoes", Some(json!({ "nome": "PUC Minas" }))).await;
        let (status, professor) = enviar(
            app,
            "POST",
            "/api/professores",
            Some(json!({
                "nome": "Carlos",
                "documento": "123.456.789-00",
                "email": "carlos@puc.br",
                "login": "carlos",
                "senha": "segredo123",
                "departamento": "DCC",
                "instituicaoId": instituicao["id"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        professor["id"].as_i64().unwrap()
    }

    async fn cadastrar_aluno(app: &Router, email: &str) -> i64 {
        let (status, aluno) = enviar(
            app,
            "POST",
            "/api/alunos",
            Some(json!({ "nome": "Ana", "email": email })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        aluno["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn health() {
        let app = create_test_app();
        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn fluxo_de_credito_e_transferencia() {
        let app = create_test_app();
        let professor_id = cadastrar_professor(&app).await;
        let aluno_id = cadastrar_aluno(&app, "ana@puc.br").await;

        let (status, credito) = enviar(
            &app,
            "PATCH",
            &format!("/api/professores/{professor_id}/adicionar-moedas?quantidade=100"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(credito["saldoMoedas"], json!(100.0));

        let (status, envio) = enviar(
            &app,
            "POST",
            &format!("/api/professores/{professor_id}/enviar-moedas"),
            Some(json!({ "alunoId": aluno_id, "quantidade": 30, "motivo": "Seminário" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envio["saldoRestanteProfessor"], json!(70.0));
        assert_eq!(envio["novoSaldoAluno"], json!(30.0));
        assert_eq!(envio["mensagem"], "Transferência de 30.00 moedas realizada com sucesso!");

        let (status, transacoes) =
            enviar(&app, "GET", &format!("/api/transacoes/aluno/{aluno_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(transacoes.as_array().unwrap().len(), 1);
        assert_eq!(transacoes[0]["tipo"], "TRANSFERENCIA_PROFESSOR_ALUNO");
    }

    #[tokio::test]
    async fn saldo_insuficiente_e_400() {
        let app = create_test_app();
        let professor_id = cadastrar_professor(&app).await;
        let aluno_id = cadastrar_aluno(&app, "ana@puc.br").await;

        let (status, body) = enviar(
            &app,
            "POST",
            &format!("/api/professores/{professor_id}/enviar-moedas"),
            Some(json!({ "alunoId": aluno_id, "quantidade": 30, "motivo": "Seminário" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Saldo insuficiente. Saldo atual: 0.00, Quantidade solicitada: 30.00"
        );
    }

    #[tokio::test]
    async fn payload_invalido_lista_os_campos() {
        let app = create_test_app();
        let professor_id = cadastrar_professor(&app).await;

        let (status, body) = enviar(
            &app,
            "POST",
            &format!("/api/professores/{professor_id}/enviar-moedas"),
            Some(json!({ "quantidade": -1, "motivo": "  " })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].get("aluno_id").is_some());
        assert!(body["details"].get("motivo").is_some());
    }

    #[tokio::test]
    async fn credito_nao_positivo_e_400() {
        let app = create_test_app();
        let professor_id = cadastrar_professor(&app).await;

        let (status, body) = enviar(
            &app,
            "PATCH",
            &format!("/api/professores/{professor_id}/adicionar-moedas?quantidade=0"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Quantidade deve ser maior que zero");
    }

    #[tokio::test]
    async fn professor_inexistente_e_404_sem_corpo() {
        let app = create_test_app();
        let (status, body) = enviar(&app, "GET", "/api/professores/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn email_de_professor_repetido_e_409() {
        let app = create_test_app();
        cadastrar_professor(&app).await;
        let (_, instituicoes) = enviar(&app, "GET", "/api/instituicoes", None).await;

        let (status, body) = enviar(
            &app,
            "POST",
            "/api/professores",
            Some(json!({
                "nome": "Outro",
                "documento": "999",
                "email": "carlos@puc.br",
                "login": "outro",
                "senha": "segredo123",
                "departamento": "DCC",
                "instituicaoId": instituicoes[0]["id"],
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email já cadastrado: carlos@puc.br");
    }

    #[tokio::test]
    async fn senha_nao_aparece_na_resposta() {
        let app = create_test_app();
        let professor_id = cadastrar_professor(&app).await;
        let (_, professor) = enviar(&app, "GET", &format!("/api/professores/{professor_id}"), None).await;

        assert_eq!(professor["instituicaoNome"], "PUC Minas");
        assert!(professor.get("senha").is_none());
        assert!(professor.get("senhaHash").is_none());
    }

    #[tokio::test]
    async fn resgate_e_uso_do_cupom() {
        let app = create_test_app();
        let professor_id = cadastrar_professor(&app).await;
        let aluno_id = cadastrar_aluno(&app, "ana@puc.br").await;
        enviar(
            &app,
            "PATCH",
            &format!("/api/professores/{professor_id}/adicionar-moedas?quantidade=100"),
            None,
        )
        .await;
        enviar(
            &app,
            "POST",
            &format!("/api/professores/{professor_id}/enviar-moedas"),
            Some(json!({ "alunoId": aluno_id, "quantidade": 60, "motivo": "Projeto" })),
        )
        .await;

        let (_, empresa) = enviar(
            &app,
            "POST",
            "/api/empresas",
            Some(json!({ "nome": "Cantina Central LTDA", "nomeFantasia": "Cantina", "email": "cantina@puc.br" })),
        )
        .await;
        let (status, vantagem) = enviar(
            &app,
            "POST",
            "/api/vantagens",
            Some(json!({ "descricao": "Café grátis", "custoMoedas": 50, "empresaId": empresa["id"] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(vantagem["empresaNome"], "Cantina");

        let (status, resgate) = enviar(
            &app,
            "POST",
            &format!("/api/vantagens/{}/resgatar?alunoId={aluno_id}", vantagem["id"]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resgate["novoSaldo"], json!(10.0));
        assert_eq!(resgate["emailEmpresa"], "cantina@puc.br");
        let codigo = resgate["codigoCupom"].as_str().unwrap().to_string();
        assert!(codigo.starts_with(&format!("CUPOM-{}-{aluno_id}-", vantagem["id"])));

        let (_, cupons) = enviar(&app, "GET", &format!("/api/cupons/aluno/{aluno_id}"), None).await;
        assert_eq!(cupons[0]["codigo"], codigo.as_str());

        let (status, usado) =
            enviar(&app, "PATCH", &format!("/api/cupons/{codigo}/utilizar"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(usado["utilizado"], true);

        let (status, _) = enviar(&app, "PATCH", &format!("/api/cupons/{codigo}/utilizar"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, resgates) = enviar(&app, "GET", "/api/transacoes/tipo/resgate", None).await;
        assert_eq!(resgates.as_array().unwrap().len(), 1);
        assert_eq!(resgates[0]["valor"], json!(50.0));
    }

    #[tokio::test]
    async fn vantagens_paginadas() {
        let app = create_test_app();
        for (descricao, custo) in [("Café", 10), ("Bolo", 30), ("Almoço", 80)] {
            enviar(
                &app,
                "POST",
                "/api/vantagens",
                Some(json!({ "descricao": descricao, "custoMoedas": custo })),
            )
            .await;
        }

        let (status, page) = enviar(
            &app,
            "GET",
            "/api/vantagens?page=0&size=2&sortBy=custoMoedas&direction=DESC",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["items"][0]["descricao"], "Almoço");
        assert_eq!(page["items"].as_array().unwrap().len(), 2);
        assert_eq!(page["pagination"]["totalItems"], 3);
        assert_eq!(page["pagination"]["totalPages"], 2);
        assert_eq!(page["pagination"]["hasNext"], true);

        let (status, _) = enviar(&app, "GET", "/api/vantagens?size=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, page) = enviar(&app, "GET", "/api/vantagens?page=4294967295", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["items"].as_array().unwrap().len(), 0);
        assert_eq!(page["pagination"]["hasNext"], false);
        assert_eq!(page["pagination"]["hasPrevious"], true);
    }

    #[tokio::test]
    async fn resgate_sem_aluno_valido_e_400_com_corpo() {
        let app = create_test_app();
        let (_, vantagem) = enviar(
            &app,
            "POST",
            "/api/vantagens",
            Some(json!({ "descricao": "Café grátis", "custoMoedas": 10 })),
        )
        .await;
        let id = &vantagem["id"];

        let (status, body) = enviar(&app, "POST", &format!("/api/vantagens/{id}/resgatar"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ID do aluno é obrigatório");

        let (status, body) =
            enviar(&app, "POST", &format!("/api/vantagens/{id}/resgatar?alunoId=abc"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ID do aluno inválido: abc");
    }

    #[tokio::test]
    async fn quantidade_fora_do_formato_de_moedas_e_400() {
        let app = create_test_app();
        let professor_id = cadastrar_professor(&app).await;
        let aluno_id = cadastrar_aluno(&app, "ana@puc.br").await;

        let (status, body) = enviar(
            &app,
            "PATCH",
            &format!("/api/professores/{professor_id}/adicionar-moedas?quantidade=0.001"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Quantidade deve ter no máximo 2 casas decimais");

        let (status, body) = enviar(
            &app,
            "PATCH",
            &format!("/api/professores/{professor_id}/adicionar-moedas?quantidade=1000000000000"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Quantidade excede o valor máximo permitido");

        enviar(
            &app,
            "PATCH",
            &format!("/api/professores/{professor_id}/adicionar-moedas?quantidade=100"),
            None,
        )
        .await;
        let (status, body) = enviar(
            &app,
            "POST",
            &format!("/api/professores/{professor_id}/enviar-moedas"),
            Some(json!({ "alunoId": aluno_id, "quantidade": 0.005, "motivo": "Projeto" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].get("quantidade").is_some());

        let (_, professor) = enviar(&app, "GET", &format!("/api/professores/{professor_id}"), None).await;
        assert_eq!(professor["saldoMoedas"], json!(100.0));
    }

    #[tokio::test]
    async fn locadora_cliente_e_agente() {
        let app = create_test_app();

        let (status, pedido) =
            enviar(&app, "POST", "/api/client/pedidos", Some(json!({ "clientName": "Bia" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pedido["status"], "pendente");
        assert_eq!(pedido["car"], "Modelo");
        let id = pedido["id"].as_str().unwrap().to_string();

        let (_, pendentes) = enviar(&app, "GET", "/api/agent/pedidos/pendentes", None).await;
        assert_eq!(pendentes.as_array().unwrap().len(), 1);

        let (status, _) =
            enviar(&app, "POST", &format!("/api/agent/avaliar/{id}?acao=cancelar"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, avaliado) =
            enviar(&app, "POST", &format!("/api/agent/avaliar/{id}?acao=Aprovar"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(avaliado["status"], "aprovado");

        let (status, _) = enviar(&app, "DELETE", &format!("/api/client/pedidos/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = enviar(&app, "DELETE", &format!("/api/client/pedidos/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = enviar(&app, "GET", &format!("/api/client/pedidos/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, veiculo) = enviar(&app, "POST", "/api/agent/veiculos", Some(json!({}))).await;
        assert_eq!(veiculo["placa"], "ABC1D23");
        assert_eq!(veiculo["diaria"], json!(100.0));
    }
}
